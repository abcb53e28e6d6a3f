/// Property tests for the contribution and streak computations and the
/// store contracts they rely on

mod contribution_props;
mod store_props;
mod streak_props;

use chrono::{Days, NaiveDate};

pub fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid base date")
}

pub fn day(offset: u64) -> NaiveDate {
    base() + Days::new(offset)
}
