//! Streak calculation
//!
//! A streak is the number of consecutive cadence periods, ending with the
//! period that contains "today", in which the habit was completed at least
//! once. Everything here is a pure function of its inputs; "today" is always
//! passed in by the caller.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Cadence, HabitId};

/// Current streak for a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub habit_id: HabitId,
    pub current_count: u32,
}

impl Streak {
    /// A streak that has not started
    pub fn zero(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_count: 0,
        }
    }

    /// Compute the streak for a habit from its completion dates
    pub fn calculate(habit_id: HabitId, cadence: Cadence, today: NaiveDate, dates: &[NaiveDate]) -> Self {
        Self {
            habit_id,
            current_count: current_streak(cadence, today, dates),
        }
    }

    /// Display label, e.g. "1 day streak" or "3 weeks streak"
    pub fn label(&self, cadence: Cadence) -> String {
        let unit = cadence.period_name();
        if self.current_count == 1 {
            format!("1 {} streak", unit)
        } else {
            format!("{} {}s streak", self.current_count, unit)
        }
    }
}

/// Length of the current streak at `cadence` as seen on `today`
///
/// `dates` are usually supplied newest first but neither order nor
/// uniqueness is relied on.
pub fn current_streak(cadence: Cadence, today: NaiveDate, dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    match cadence {
        Cadence::Daily => daily_streak(today, dates),
        Cadence::Weekly => weekly_streak(today, dates),
        Cadence::Monthly => monthly_streak(today, dates),
    }
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Count the run `today, today-1, today-2, ...` contained in `dates`
///
/// Future-dated completions never match the cursor and are skipped, as are
/// repeated dates.
fn daily_streak(today: NaiveDate, dates: &[NaiveDate]) -> u32 {
    let mut past: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();
    past.sort_unstable_by(|a, b| b.cmp(a));
    past.dedup();

    let mut count = 0;
    let mut cursor = today;

    for date in past {
        if date != cursor {
            break;
        }
        count += 1;
        cursor = match cursor.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
    }

    count
}

/// Count consecutive Sunday-anchored weeks, ending with this week, that hold
/// at least one completion
///
/// The weekly schedule is not consulted: any day of the week counts.
fn weekly_streak(today: NaiveDate, dates: &[NaiveDate]) -> u32 {
    let weeks: HashSet<NaiveDate> = dates.iter().map(|d| week_start(*d)).collect();

    let mut count = 0;
    let mut window = week_start(today);

    while weeks.contains(&window) {
        count += 1;
        window = match window.checked_sub_days(Days::new(7)) {
            Some(previous) => previous,
            None => break,
        };
    }

    count
}

/// Count consecutive calendar months, ending with this month, that hold at
/// least one completion
fn monthly_streak(today: NaiveDate, dates: &[NaiveDate]) -> u32 {
    let months: HashSet<(i32, u32)> = dates.iter().map(|d| (d.year(), d.month())).collect();

    let mut count = 0;
    let (mut year, mut month) = (today.year(), today.month());

    while months.contains(&(year, month)) {
        count += 1;
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }

    count
}
