use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contribution count for a single calendar day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// Date-ascending contribution history, unique by date.
///
/// Days missing from the series are distinct from days recorded with a zero
/// count: `get` returns `None` for the former, while `count_on` reads both
/// as 0. The streak calculator relies on that difference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ContributionDay>", into = "Vec<ContributionDay>")]
pub struct ContributionSeries {
    days: BTreeMap<NaiveDate, u32>,
}

impl ContributionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a day, replacing any count already recorded for that date
    pub fn insert(&mut self, day: ContributionDay) {
        self.days.insert(day.date, day.count);
    }

    pub fn get(&self, date: NaiveDate) -> Option<u32> {
        self.days.get(&date).copied()
    }

    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.get(date).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn total(&self) -> u64 {
        self.days.values().map(|&count| u64::from(count)).sum()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ContributionDay> + '_ {
        self.days
            .iter()
            .map(|(&date, &count)| ContributionDay { date, count })
    }

    pub fn to_days(&self) -> Vec<ContributionDay> {
        self.iter().collect()
    }
}

impl FromIterator<ContributionDay> for ContributionSeries {
    fn from_iter<I: IntoIterator<Item = ContributionDay>>(iter: I) -> Self {
        let mut series = ContributionSeries::new();
        for day in iter {
            series.insert(day);
        }
        series
    }
}

impl From<Vec<ContributionDay>> for ContributionSeries {
    fn from(days: Vec<ContributionDay>) -> Self {
        days.into_iter().collect()
    }
}

impl From<ContributionSeries> for Vec<ContributionDay> {
    fn from(series: ContributionSeries) -> Self {
        series.to_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absent_and_zero_are_distinct() {
        let series: ContributionSeries = vec![ContributionDay::new(date(2024, 1, 1), 0)].into();

        assert_eq!(series.get(date(2024, 1, 1)), Some(0));
        assert_eq!(series.get(date(2024, 1, 2)), None);
        assert_eq!(series.count_on(date(2024, 1, 2)), 0);
    }

    #[test]
    fn test_sorted_and_unique() {
        let series: ContributionSeries = vec![
            ContributionDay::new(date(2024, 3, 1), 1),
            ContributionDay::new(date(2024, 1, 1), 2),
            ContributionDay::new(date(2024, 3, 1), 7),
        ]
        .into();

        assert_eq!(
            series.to_days(),
            vec![
                ContributionDay::new(date(2024, 1, 1), 2),
                ContributionDay::new(date(2024, 3, 1), 7),
            ]
        );
        assert_eq!(series.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2024, 3, 1)));
        assert_eq!(series.total(), 9);
    }

    #[test]
    fn test_serializes_as_day_list() {
        let series: ContributionSeries = vec![ContributionDay::new(date(2024, 2, 29), 4)].into();

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json, serde_json::json!([{ "date": "2024-02-29", "count": 4 }]));

        let back: ContributionSeries = serde_json::from_value(json).unwrap();
        assert_eq!(back, series);
    }
}
