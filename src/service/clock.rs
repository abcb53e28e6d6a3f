//! Source of "today"
//!
//! Every façade operation reads the clock once at entry and passes the date
//! down as a value.

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{Datelike, Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// The current civil date
    fn today(&self) -> NaiveDate;
}

/// The server's local civil day
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    days_from_ce: AtomicI32,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            days_from_ce: AtomicI32::new(today.num_days_from_ce()),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.days_from_ce.store(today.num_days_from_ce(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        let days = self.days_from_ce.load(Ordering::SeqCst);
        // Only ever holds values produced from a valid NaiveDate
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or(NaiveDate::MIN)
    }
}
