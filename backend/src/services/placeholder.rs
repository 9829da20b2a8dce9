use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::ContributionDay;

/// One year back from today, inclusive
const PLACEHOLDER_DAYS: i64 = 366;

/// Synthetic history so a card can still render when GitHub is unreachable.
/// About 70% of days get 0-9 contributions, the rest are zero.
pub fn generate_placeholder_contributions<R: Rng + ?Sized>(
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ContributionDay> {
    (0..PLACEHOLDER_DAYS)
        .rev()
        .map(|days_back| {
            let count = if rng.gen_bool(0.7) {
                rng.gen_range(0..10)
            } else {
                0
            };
            ContributionDay::new(today - Duration::days(days_back), count)
        })
        .collect()
}
