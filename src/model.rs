use chrono::{DateTime, Datelike, Month, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Grid row order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Grid column order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Full English name of a weekday, independent of locale.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Full English name of a month, independent of locale.
pub fn month_name(month: Month) -> &'static str {
    month.name()
}

/// Classifies a commit date by day of week and month. Years collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub weekday: Weekday,
    pub month: Month,
}

impl BucketKey {
    pub fn new(weekday: Weekday, month: Month) -> Self {
        Self { weekday, month }
    }

    pub fn from_date(date: &NaiveDate) -> Self {
        Self {
            weekday: date.weekday(),
            month: MONTHS[date.month0() as usize],
        }
    }

    pub fn row(&self) -> usize {
        self.weekday.num_days_from_monday() as usize
    }

    pub fn column(&self) -> usize {
        self.month.number_from_month() as usize - 1
    }
}

/// Sparse commit counts keyed by (weekday, month).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketCounts {
    counts: HashMap<BucketKey, u64>,
}

impl BucketCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: BucketKey, count: u64) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    pub fn increment(&mut self, key: BucketKey) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &BucketKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over every bucket.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &u64)> + '_ {
        self.counts.iter()
    }
}

impl FromIterator<(BucketKey, u64)> for BucketCounts {
    fn from_iter<I: IntoIterator<Item = (BucketKey, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, count) in iter {
            counts.add(key, count);
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowOutput {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOutput {
    pub name: String,
    pub path: String,
    /// One of `no_commits`, `no_commits_in_window`, `reported`, `failed`.
    pub outcome: String,
    pub commit_count: u64,
    pub artifact: Option<String>,
    pub error: Option<String>,
    /// Rows follow `weekdays`, columns follow `months`.
    pub grid: Option<Vec<Vec<u64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub author: String,
    pub window: WindowOutput,
    pub weekdays: Vec<String>,
    pub months: Vec<String>,
    pub repositories: Vec<RepositoryOutput>,
    pub summary: Option<Vec<Vec<u64>>>,
    pub summary_artifact: Option<String>,
}
