//! Parsing of extractor date strings and the trailing-window filter.
//!
//! The window is twelve 30-day "months" long, so it is 360 days rather than a
//! calendar year. Only the lower bound is checked; nothing committed after
//! `end` can exist at the time the window is taken.

use crate::error::{HeatError, Result};
use chrono::{Duration, Local, NaiveDate};

pub const WINDOW_DAYS: i64 = 30 * 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// Window ending on `today`, starting `WINDOW_DAYS` earlier.
    pub fn trailing(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(WINDOW_DAYS),
            end: today,
        }
    }

    /// Window ending on the local calendar date.
    pub fn ending_today() -> Self {
        Self::trailing(Local::now().date_naive())
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start
    }
}

/// Parse the leading `YYYY-MM-DD` token of one extractor line.
pub fn parse_commit_date(raw: &str) -> Result<NaiveDate> {
    let token = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| HeatError::InvalidDate(format!("Empty date line: '{raw}'")))?;

    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|e| HeatError::InvalidDate(format!("'{token}': {e}")))
}

/// Parse every line and keep the dates inside `window`.
///
/// A single malformed line fails the whole batch.
pub fn dates_in_window<S: AsRef<str>>(raw: &[S], window: &Window) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(raw.len());
    for line in raw {
        let date = parse_commit_date(line.as_ref())?;
        if window.contains(&date) {
            dates.push(date);
        }
    }
    Ok(dates)
}
