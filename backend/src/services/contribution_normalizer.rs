use crate::models::{ContributionDay, ContributionSeries};

/// Merge per-year day lists into one date-ascending series.
///
/// Year windows can return the same date more than once. The last record seen
/// for a date (in year order, then response order) replaces earlier ones;
/// counts are never summed or averaged across duplicates.
pub fn normalize<I>(years: I) -> ContributionSeries
where
    I: IntoIterator<Item = Vec<ContributionDay>>,
{
    years.into_iter().flatten().collect()
}
