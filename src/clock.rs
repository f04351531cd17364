//! Source of "today" for the lending engine.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date
pub trait Clock {
    /// The date considered to be today
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
