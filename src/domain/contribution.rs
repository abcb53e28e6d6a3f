//! Projection of sparse completion dates onto a dense per-day grid

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::ContributionDay;

/// Build one entry per day of the inclusive window `[from, to]`
///
/// A day is completed iff its date appears in `completed_dates`; cadence
/// and schedule play no part. Dates outside the window are ignored and an
/// inverted window yields an empty grid.
pub fn build_contribution<I>(from: NaiveDate, to: NaiveDate, completed_dates: I) -> Vec<ContributionDay>
where
    I: IntoIterator<Item = NaiveDate>,
{
    if from > to {
        return Vec::new();
    }

    let completed: HashSet<NaiveDate> = completed_dates
        .into_iter()
        .filter(|d| *d >= from && *d <= to)
        .collect();

    let len = (to - from).num_days() as usize + 1;
    let mut days = Vec::with_capacity(len);
    days.extend(
        from.iter_days()
            .take_while(|d| *d <= to)
            .map(|date| ContributionDay {
                date,
                completed: completed.contains(&date),
            }),
    );
    days
}
