/// A scripted MCP session over in-memory pipes
use std::sync::Arc;

use habit_streaks::mcp::McpServer;
use habit_streaks::*;
use serde_json::{json, Value};

use super::date;

fn server() -> McpServer {
    let storage = Arc::new(SqliteStorage::in_memory().expect("Failed to open storage"));
    let clock = Arc::new(ManualClock::new(date(2025, 1, 9)));
    McpServer::new(HabitStreakServer::from_service(HabitService::new(storage, clock)))
}

fn script(lines: &[Value]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

async fn run(server: &McpServer, input: String) -> Vec<Value> {
    let mut output = Vec::new();
    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("Session failed");

    String::from_utf8(output)
        .expect("Output is UTF-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("Each line is JSON"))
        .collect()
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_full_session() {
    let server = server();
    let input = script(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {
            "name": "habit_create",
            "arguments": {"description": "Walk the dog", "cadence": "weekly", "days_of_week": [3], "start_date": "2024-12-01"}
        }}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "habit_done_today", "arguments": {"habit_id": 1}
        }}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
            "name": "habit_contribution",
            "arguments": {"habit_id": 1, "from": "2025-01-05", "to": "2025-01-11"}
        }}),
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "habit_list", "arguments": {}}}),
    ]);

    let responses = run(&server, input).await;

    // The notification is not answered
    assert_eq!(responses.len(), 5);
    assert_eq!(responses.iter().map(|r| r["id"].clone()).collect::<Vec<_>>(), vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "Habit Streaks MCP");
    assert!(text(&responses[1]).contains("Created weekly habit 'Walk the dog'"));
    assert!(text(&responses[2]).contains("1 week streak"));

    let grid = text(&responses[3]);
    assert!(grid.contains("1 of 7 days completed"));
    assert!(grid.contains("Thu ■"));

    assert!(text(&responses[4]).contains("1 habits, 1 done today"));
}

#[tokio::test]
async fn test_bad_lines_do_not_end_session() {
    let server = server();
    let input = format!(
        "{}\nnot json\n\n{}\n",
        json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "habit_get", "arguments": {"habit_id": 7}}}),
    );

    let responses = run(&server, input).await;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"], json!({}));
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[2]["result"]["isError"], true);
}

#[test]
fn test_session_on_blocking_runtime() {
    let server = server();
    let input = script(&[json!({"jsonrpc": "2.0", "id": 9, "method": "tools/list"})]);

    let responses = tokio_test::block_on(run(&server, input));
    let names: Vec<&str> = responses[0]["result"]["tools"]
        .as_array()
        .map(|tools| tools.iter().filter_map(|t| t["name"].as_str()).collect())
        .unwrap_or_default();

    assert!(names.contains(&"habit_done_today"));
    assert!(names.contains(&"habit_contribution"));
    assert_eq!(names.len(), 8);
}
