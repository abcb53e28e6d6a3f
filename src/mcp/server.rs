/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests
/// 2. Routes tool calls to the habit service
/// 3. Writes one JSON-RPC response per request (notifications get none)

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::service::{HabitService, ServiceError};
use crate::storage::SqliteStorage;
use crate::tools;
use crate::{HabitStreakServer, ServerError};

/// Arguments for tools that take none
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// MCP server that handles communication with the client
pub struct McpServer {
    habit_streaks: HabitStreakServer,
}

impl McpServer {
    pub fn new(habit_streaks: HabitStreakServer) -> Self {
        Self { habit_streaks }
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve requests from `reader` until it is exhausted
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    pub fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let message: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        // Echo whatever id the malformed request carried
        let raw_id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    raw_id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return request.id.map(|id| {
                JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
                )
            });
        }

        if request.is_notification() {
            debug!("Notification '{}' acknowledged", request.method);
            return None;
        }

        Some(self.handle_request(request))
    }

    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(request.params),
            _ => Err((
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
            )),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        }
    }

    fn handle_initialize(&self) -> Result<Value, (i32, String)> {
        info!("MCP client connected");

        to_result(InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: "Habit Streaks MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    fn handle_tools_list(&self) -> Value {
        let tools = vec![
            tool::<tools::CreateHabitParams>(
                "habit_create",
                "Create a daily, weekly or monthly habit",
            ),
            tool::<tools::UpdateHabitParams>(
                "habit_update",
                "Replace a habit's description, cadence, schedule, start date and colour",
            ),
            tool::<tools::HabitRef>("habit_delete", "Delete a habit and all its completions"),
            tool::<tools::HabitRef>("habit_get", "Show one habit with its current streak"),
            tool::<NoParams>("habit_list", "List all habits, newest first, with today's status"),
            tool::<tools::HabitRef>("habit_done_today", "Mark a habit as done today"),
            tool::<tools::ContributionParams>(
                "habit_contribution",
                "Show a day-by-day completion grid, by default for the last year",
            ),
            tool::<tools::HabitRef>("habit_streak", "Show a habit's current streak"),
        ];

        json!({ "tools": tools })
    }

    fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params = params.ok_or((error_codes::INVALID_PARAMS, "Missing parameters".to_string()))?;
        let tool_params: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| (error_codes::INVALID_PARAMS, format!("Invalid parameters: {}", e)))?;

        let args = tool_params.arguments;
        let result = match tool_params.name.as_str() {
            "habit_create" => self.call(args, |s, p| tools::create_habit(s, p).map(|r| r.message)),
            "habit_update" => self.call(args, |s, p| tools::update_habit(s, p).map(|r| r.message)),
            "habit_delete" => self.call(args, |s, p| tools::delete_habit(s, p).map(|r| r.message)),
            "habit_get" => self.call(args, |s, p| tools::get_habit(s, p).map(|r| r.message)),
            "habit_list" => self.call(args, |s, _: NoParams| tools::list_habits(s).map(|r| r.message)),
            "habit_done_today" => self.call(args, |s, p| tools::mark_done_today(s, p).map(|r| r.message)),
            "habit_contribution" => {
                self.call(args, |s, p| tools::get_contribution(s, p).map(|r| r.message))
            }
            "habit_streak" => self.call(args, |s, p| tools::get_streak(s, p).map(|r| r.message)),
            other => ToolCallResult::error(format!("Unknown tool: {}", other)),
        };

        to_result(result)
    }

    /// Decode the arguments and run one tool against the service
    fn call<P, F>(&self, args: Map<String, Value>, handler: F) -> ToolCallResult
    where
        P: DeserializeOwned,
        F: FnOnce(&HabitService<SqliteStorage>, P) -> Result<String, ServiceError>,
    {
        let params: P = match serde_json::from_value(Value::Object(args)) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match handler(self.habit_streaks.service(), params) {
            Ok(message) => ToolCallResult::success(message),
            Err(e) => {
                if matches!(e, ServiceError::Storage(_) | ServiceError::Internal(_)) {
                    error!("Tool call failed: {}", e);
                }
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value).map_err(|e| (error_codes::INTERNAL_ERROR, e.to_string()))
}

fn tool<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: input_schema::<T>(),
    }
}

/// JSON schema of a tool's argument type
pub fn input_schema<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" }))
}
