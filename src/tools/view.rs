//! Plain-text rendering of habits and contribution grids

use chrono::Datelike;

use crate::domain::{Cadence, ContributionDay, HabitSummary, Streak};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DONE: char = '■';
const MISSED: char = '·';

/// Message shown when there is nothing to list
pub const EMPTY_STATE: &str = "No habits yet. Create your first habit to get started tracking your progress!";

/// One habit as a short text card
pub fn render_habit_card(summary: &HabitSummary, streak: Option<&Streak>) -> String {
    let habit = &summary.habit;
    let mut card = format!(
        "🎯 {} (#{})\n   📅 {}{} | 🎨 {} | Started on {}",
        habit.description,
        habit.id,
        habit.cadence,
        schedule_suffix(summary),
        habit.colour,
        habit.start_date.format("%b %d, %Y"),
    );

    if let Some(streak) = streak {
        card.push_str(&format!(" | 🔥 {}", streak.label(habit.cadence)));
    }
    card.push_str(if summary.completed_today {
        "\n   ✅ Done today"
    } else {
        "\n   ⏳ Not done today"
    });

    card
}

fn schedule_suffix(summary: &HabitSummary) -> String {
    let schedule = &summary.habit.schedule;
    match summary.habit.cadence {
        Cadence::Weekly if !schedule.days_of_week.is_empty() => {
            let days: Vec<&str> = schedule
                .days_of_week
                .iter()
                .filter_map(|d| WEEKDAY_LABELS.get(*d as usize).copied())
                .collect();
            format!(" on {}", days.join(", "))
        }
        Cadence::Monthly if !schedule.days_of_month.is_empty() => {
            let days: Vec<String> = schedule.days_of_month.iter().map(|d| d.to_string()).collect();
            format!(" on day {}", days.join(", "))
        }
        _ => String::new(),
    }
}

/// Render days as a weekday-by-week grid
///
/// Rows run Sunday to Saturday and each column is one Sunday-anchored week.
/// A month label sits over the first column holding one of that month's
/// first seven days.
pub fn render_contribution_grid(days: &[ContributionDay]) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };

    let lead = first.date.weekday().num_days_from_sunday() as usize;
    let columns = (lead + days.len() + 6) / 7;
    let cell = |column: usize, row: usize| grid_cell(days, lead, column, row);

    let mut header: Vec<char> = vec![' '; 4 + columns * 2 + 2];
    let mut last_label: Option<(i32, u32)> = None;
    let mut next_free = 0;
    for column in 0..columns {
        let labelled = (0..7)
            .filter_map(|row| cell(column, row))
            .find(|d| d.date.day() <= 7 && last_label != Some((d.date.year(), d.date.month())));
        if let Some(day) = labelled {
            let at = 4 + column * 2;
            if at >= next_free {
                let label = MONTH_LABELS[day.date.month0() as usize];
                for (offset, ch) in label.chars().enumerate() {
                    header[at + offset] = ch;
                }
                next_free = at + label.len() + 1;
                last_label = Some((day.date.year(), day.date.month()));
            }
        }
    }

    let mut lines = vec![header.into_iter().collect::<String>().trim_end().to_string()];
    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        let mut line = format!("{} ", label);
        for column in 0..columns {
            let glyph = match cell(column, row) {
                Some(day) if day.completed => DONE,
                Some(_) => MISSED,
                None => ' ',
            };
            line.push(glyph);
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn grid_cell(days: &[ContributionDay], lead: usize, column: usize, row: usize) -> Option<&ContributionDay> {
    (column * 7 + row).checked_sub(lead).and_then(|i| days.get(i))
}
