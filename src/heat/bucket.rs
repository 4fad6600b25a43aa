use crate::model::{BucketCounts, BucketKey};
use chrono::NaiveDate;

/// Count commit dates per (weekday, month) bucket.
pub fn bucket_dates(dates: &[NaiveDate]) -> BucketCounts {
    let mut counts = BucketCounts::new();
    for date in dates {
        counts.increment(BucketKey::from_date(date));
    }
    counts
}
