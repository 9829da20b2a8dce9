use chrono::{Duration, NaiveDate};

use crate::models::{ContributionSeries, StreakStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StreakWindow {
    length: u32,
    start: NaiveDate,
    end: NaiveDate,
}

/// Derive totals and streak windows from a normalized series.
///
/// `today` is the invocation instant truncated to the day.
pub fn calculate_streaks(
    username: &str,
    series: &ContributionSeries,
    today: NaiveDate,
) -> StreakStats {
    if series.is_empty() {
        return StreakStats::empty(username);
    }

    let current = current_streak(series, today);
    let longest = longest_streak(series);

    StreakStats {
        username: username.to_string(),
        current_streak: current.map_or(0, |w| w.length),
        longest_streak: longest.map_or(0, |w| w.length),
        total_contributions: series.total(),
        first_contribution: series.first_date(),
        current_streak_start: current.map(|w| w.start),
        current_streak_end: current.map(|w| w.end),
        longest_streak_start: longest.map(|w| w.start),
        longest_streak_end: longest.map(|w| w.end),
    }
}

/// Streak anchored at today, or at yesterday when today has nothing yet,
/// extended backward while each preceding day has a non-zero count.
fn current_streak(series: &ContributionSeries, today: NaiveDate) -> Option<StreakWindow> {
    let yesterday = today - Duration::days(1);
    let anchor = [today, yesterday]
        .into_iter()
        .find(|&date| series.count_on(date) > 0)?;

    let mut start = anchor;
    let mut length = 1;
    while let Some(previous) = start.pred_opt() {
        if series.count_on(previous) == 0 {
            break;
        }
        start = previous;
        length += 1;
    }

    Some(StreakWindow {
        length,
        start,
        end: anchor,
    })
}

/// Longest run found by scanning records in date order.
///
/// The running length resets only on a zero-count record dated exactly one day
/// after the previous record. Dates missing from the series do not reset it,
/// so a run can continue across a gap in the data. The first maximum wins ties.
fn longest_streak(series: &ContributionSeries) -> Option<StreakWindow> {
    let mut best: Option<StreakWindow> = None;
    let mut running = 0u32;
    let mut running_start: Option<NaiveDate> = None;
    let mut previous: Option<NaiveDate> = None;

    for day in series.iter() {
        if day.count > 0 {
            if running == 0 {
                running_start = Some(day.date);
            }
            running += 1;

            if best.map_or(true, |b| running > b.length) {
                best = Some(StreakWindow {
                    length: running,
                    start: running_start.unwrap_or(day.date),
                    end: day.date,
                });
            }
        } else if previous.is_some_and(|prev| prev.succ_opt() == Some(day.date)) {
            running = 0;
        }

        previous = Some(day.date);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContributionDay;
    use crate::services::contribution_normalizer::normalize;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(days: &[(NaiveDate, u32)]) -> ContributionSeries {
        days.iter()
            .map(|&(date, count)| ContributionDay::new(date, count))
            .collect()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn test_empty_series() {
        let stats = calculate_streaks("octocat", &ContributionSeries::new(), today());
        assert_eq!(stats, StreakStats::empty("octocat"));
        assert_eq!(stats.first_contribution, None);
        assert_eq!(stats.current_streak_start, None);
        assert_eq!(stats.longest_streak_end, None);
    }

    #[test]
    fn test_total_is_order_independent() {
        let days = vec![
            ContributionDay::new(date(2024, 1, 3), 2),
            ContributionDay::new(date(2024, 1, 1), 5),
            ContributionDay::new(date(2024, 2, 9), 11),
        ];
        let mut reversed = days.clone();
        reversed.reverse();

        let a = calculate_streaks("octocat", &normalize(vec![days]), today());
        let b = calculate_streaks("octocat", &normalize(vec![reversed]), today());

        assert_eq!(a.total_contributions, 18);
        assert_eq!(a, b);
    }

    #[test]
    fn test_current_streak_running_through_today() {
        // Non-zero from 4 days ago through today, zero the day before
        let s = series(&[
            (days_ago(5), 0),
            (days_ago(4), 1),
            (days_ago(3), 2),
            (days_ago(2), 1),
            (days_ago(1), 6),
            (today(), 3),
        ]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.current_streak_start, Some(days_ago(4)));
        assert_eq!(stats.current_streak_end, Some(today()));
    }

    #[test]
    fn test_current_streak_anchors_at_yesterday() {
        let s = series(&[(days_ago(3), 1), (days_ago(2), 1), (days_ago(1), 4), (today(), 0)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.current_streak_start, Some(days_ago(3)));
        assert_eq!(stats.current_streak_end, Some(days_ago(1)));
    }

    #[test]
    fn test_no_current_streak_after_two_missed_days() {
        let s = series(&[
            (days_ago(4), 3),
            (days_ago(3), 1),
            (days_ago(2), 2),
            (days_ago(1), 0),
            (today(), 0),
        ]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.current_streak_start, None);
        assert_eq!(stats.current_streak_end, None);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_current_walk_stops_at_absent_date() {
        // days_ago(2) is missing entirely
        let s = series(&[(days_ago(3), 5), (days_ago(1), 1), (today(), 1)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.current_streak_start, Some(days_ago(1)));
    }

    #[test]
    fn test_isolated_day_is_whole_streak() {
        let s = series(&[(days_ago(2), 0), (days_ago(1), 7), (today(), 0)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.current_streak_start, Some(days_ago(1)));
        assert_eq!(stats.current_streak_end, Some(days_ago(1)));
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.longest_streak_start, Some(days_ago(1)));
        assert_eq!(stats.longest_streak_end, Some(days_ago(1)));
    }

    #[test]
    fn test_longest_streak_reset_by_adjacent_zero() {
        let s = series(&[
            (date(2024, 1, 1), 5),
            (date(2024, 1, 2), 3),
            (date(2024, 1, 3), 0),
            (date(2024, 1, 5), 2),
        ]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.longest_streak_start, Some(date(2024, 1, 1)));
        assert_eq!(stats.longest_streak_end, Some(date(2024, 1, 2)));
        assert_eq!(stats.total_contributions, 10);
        assert_eq!(stats.first_contribution, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_longest_streak_chains_across_missing_dates() {
        // Jan 3 is absent rather than zero, so the run is not reset
        let s = series(&[(date(2024, 1, 1), 1), (date(2024, 1, 2), 1), (date(2024, 1, 4), 1)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.longest_streak_start, Some(date(2024, 1, 1)));
        assert_eq!(stats.longest_streak_end, Some(date(2024, 1, 4)));
    }

    #[test]
    fn test_zero_after_gap_does_not_reset() {
        // Jan 3 is zero but its previous record is Jan 1, not Jan 2
        let s = series(&[(date(2024, 1, 1), 2), (date(2024, 1, 3), 0), (date(2024, 1, 4), 2)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.longest_streak_end, Some(date(2024, 1, 4)));
    }

    #[test]
    fn test_longest_streak_first_maximum_wins() {
        let s = series(&[
            (date(2024, 3, 1), 1),
            (date(2024, 3, 2), 1),
            (date(2024, 3, 3), 0),
            (date(2024, 3, 4), 1),
            (date(2024, 3, 5), 1),
        ]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.longest_streak_start, Some(date(2024, 3, 1)));
        assert_eq!(stats.longest_streak_end, Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_all_zero_history() {
        let s = series(&[(date(2024, 1, 1), 0), (date(2024, 1, 2), 0)]);

        let stats = calculate_streaks("octocat", &s, today());

        assert_eq!(stats.total_contributions, 0);
        assert_eq!(stats.longest_streak, 0);
        assert_eq!(stats.longest_streak_start, None);
        // Earliest date in the series, even with a zero count
        assert_eq!(stats.first_contribution, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_streak_across_year_boundary() {
        let years = vec![
            vec![
                ContributionDay::new(date(2023, 12, 30), 1),
                ContributionDay::new(date(2023, 12, 31), 2),
            ],
            vec![
                ContributionDay::new(date(2024, 1, 1), 3),
                ContributionDay::new(date(2024, 1, 2), 0),
            ],
        ];

        let stats = calculate_streaks("octocat", &normalize(years), date(2024, 1, 1));

        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.longest_streak_start, Some(date(2023, 12, 30)));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.current_streak_end, Some(date(2024, 1, 1)));
    }
}
