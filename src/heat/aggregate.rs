use crate::model::BucketCounts;

/// Fold `local` into `global`, adding counts key by key.
pub fn merge(global: &mut BucketCounts, local: &BucketCounts) {
    for (key, count) in local.iter() {
        global.add(*key, *count);
    }
}

/// Merge any number of per-repository counts into one total.
pub fn merge_all<'a, I>(all: I) -> BucketCounts
where
    I: IntoIterator<Item = &'a BucketCounts>,
{
    all.into_iter().fold(BucketCounts::new(), |mut global, local| {
        merge(&mut global, local);
        global
    })
}
