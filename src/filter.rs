use crate::series::MeasurementSeries;
use chrono::{Duration, NaiveDate};
use std::{cmp::Reverse, fmt, str::FromStr};

/// Trailing window of days used to trim the active series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationWindow {
    Days(u32),
    All,
}

impl DurationWindow {
    pub const WEEK: Self = Self::Days(7);
    pub const MONTH: Self = Self::Days(30);
    pub const QUARTER: Self = Self::Days(90);
    pub const HALF_YEAR: Self = Self::Days(180);
    pub const YEAR: Self = Self::Days(365);
    pub const THREE_YEARS: Self = Self::Days(1095);

    pub fn label(&self) -> String {
        match self {
            Self::Days(7) => "1 week".to_string(),
            Self::Days(30) => "1 month".to_string(),
            Self::Days(90) => "3 months".to_string(),
            Self::Days(180) => "6 months".to_string(),
            Self::Days(365) => "1 year".to_string(),
            Self::Days(1095) => "3 years".to_string(),
            Self::Days(days) => format!("{days} days"),
            Self::All => "All".to_string(),
        }
    }
}

impl fmt::Display for DurationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::All => f.write_str("all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration '{0}': expected a positive number of days or 'all'")]
pub struct ParseDurationError(pub String);

impl FromStr for DurationWindow {
    type Err = ParseDurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match value.parse::<u32>() {
            Ok(days) if days > 0 => Ok(Self::Days(days)),
            _ => Err(ParseDurationError(raw.to_string())),
        }
    }
}

/// First date still inside the window, or `None` when nothing is cut.
/// Windows reaching past the earliest representable date clamp to it.
pub fn cutoff_date(window: DurationWindow, today: NaiveDate) -> Option<NaiveDate> {
    match window {
        DurationWindow::All => None,
        DurationWindow::Days(days) => Some(
            today
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(NaiveDate::MIN),
        ),
    }
}

/// Keeps the observations dated on or after `today - days`. The comparison
/// is date-granular: everything dated on the cutoff day itself is kept.
/// Observations whose date did not parse never pass the comparison.
pub fn filter_by_duration(
    series: &MeasurementSeries,
    window: DurationWindow,
    today: NaiveDate,
) -> MeasurementSeries {
    let Some(cutoff) = cutoff_date(window, today) else {
        return series.clone();
    };

    let keep: Vec<usize> = series
        .dates()
        .iter()
        .enumerate()
        .filter(|(_, date)| date.date().is_some_and(|date| date >= cutoff))
        .map(|(index, _)| index)
        .collect();

    series.select(&keep)
}

/// Index permutation for the table: newest first, ties keep storage order,
/// unparseable dates last.
pub fn display_order(series: &MeasurementSeries) -> Vec<usize> {
    let dates = series.dates();
    let mut order: Vec<usize> = (0..dates.len()).collect();
    order.sort_by_key(|&index| match dates[index].date() {
        Some(date) => (false, Reverse(date)),
        None => (true, Reverse(NaiveDate::MIN)),
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyRecord;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(dates: &[&str], weights: &[f64]) -> MeasurementSeries {
        let records: Vec<DailyRecord> = dates
            .iter()
            .zip(weights)
            .map(|(date, weight)| DailyRecord {
                date: date.to_string(),
                weight: Some(*weight),
                body_fat: Some(weight / 4.0),
            })
            .collect();
        MeasurementSeries::from_daily(&records)
    }

    #[test]
    fn parses_control_values() {
        assert_eq!("all".parse::<DurationWindow>(), Ok(DurationWindow::All));
        assert_eq!("30".parse::<DurationWindow>(), Ok(DurationWindow::MONTH));
        assert_eq!(" 1095 ".parse::<DurationWindow>(), Ok(DurationWindow::THREE_YEARS));
        assert!("0".parse::<DurationWindow>().is_err());
        assert!("-7".parse::<DurationWindow>().is_err());
        assert!("week".parse::<DurationWindow>().is_err());
        assert_eq!(DurationWindow::YEAR.to_string(), "365");
        assert_eq!(DurationWindow::All.to_string(), "all");
    }

    #[test]
    fn keeps_only_entries_inside_window() {
        let input = series(&["2024-01-01", "2024-06-01"], &[70.0, 68.0]);
        let filtered = filter_by_duration(&input, DurationWindow::QUARTER, day(2024, 6, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.dates()[0].label(), "2024-06-01");
        assert_eq!(filtered.weight()[0], Some(68.0));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let input = series(&["2023-12-17", "2023-12-18", "2024-01-01", "2024-06-01"], &[71.0, 70.5, 70.0, 68.0]);
        let today = day(2024, 6, 15);
        assert_eq!(cutoff_date(DurationWindow::HALF_YEAR, today), Some(day(2023, 12, 18)));

        let filtered = filter_by_duration(&input, DurationWindow::HALF_YEAR, today);
        let labels: Vec<&str> = filtered.dates().iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["2023-12-18", "2024-01-01", "2024-06-01"]);
    }

    #[test]
    fn every_kept_entry_is_after_cutoff_and_aligned() {
        let input = series(
            &["2024-05-01", "2024-05-20", "bogus", "2024-06-10", "2024-06-14"],
            &[72.0, 71.0, 70.5, 70.0, 69.0],
        );
        let today = day(2024, 6, 15);
        for window in [
            DurationWindow::WEEK,
            DurationWindow::MONTH,
            DurationWindow::QUARTER,
            DurationWindow::Days(1),
        ] {
            let cutoff = cutoff_date(window, today).unwrap();
            let filtered = filter_by_duration(&input, window, today);
            for (index, date) in filtered.dates().iter().enumerate() {
                assert!(date.date().unwrap() >= cutoff);
                let original = input
                    .dates()
                    .iter()
                    .position(|candidate| candidate == date)
                    .unwrap();
                assert_eq!(filtered.weight()[index], input.weight()[original]);
                assert_eq!(filtered.body_fat()[index], input.body_fat()[original]);
            }
        }
    }

    #[test]
    fn all_returns_series_unchanged() {
        let input = series(&["2020-01-01", "bogus", "2024-06-01"], &[80.0, 75.0, 68.0]);
        let filtered = filter_by_duration(&input, DurationWindow::All, day(2024, 6, 15));
        assert_eq!(filtered, input);
    }

    #[test]
    fn huge_window_keeps_everything_valid() {
        let window: DurationWindow = "100000000".parse().unwrap();
        let today = day(2024, 6, 15);
        assert_eq!(cutoff_date(window, today), Some(NaiveDate::MIN));
        assert!(filter_by_duration(&MeasurementSeries::empty(), window, today).is_empty());

        let input = series(&["1900-01-01", "bogus", "2024-06-01"], &[80.0, 75.0, 68.0]);
        let filtered = filter_by_duration(&input, window, today);
        let labels: Vec<&str> = filtered.dates().iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["1900-01-01", "2024-06-01"]);
    }

    #[test]
    fn unparseable_dates_are_excluded() {
        let input = series(&["bogus", "2024-06-10"], &[70.0, 69.0]);
        let filtered = filter_by_duration(&input, DurationWindow::THREE_YEARS, day(2024, 6, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.dates()[0].label(), "2024-06-10");
    }

    #[test]
    fn future_cutoff_yields_empty_series() {
        // Cutoff lies after every observation.
        let input = series(&["2024-01-01", "2024-06-01"], &[70.0, 68.0]);
        let filtered = filter_by_duration(&input, DurationWindow::WEEK, day(2030, 1, 1));
        assert!(filtered.is_empty());
        assert!(filtered.weight().is_empty());
        assert!(filtered.body_fat().is_empty());
    }

    #[test]
    fn empty_series_stays_empty() {
        let empty = MeasurementSeries::empty();
        for window in [DurationWindow::WEEK, DurationWindow::THREE_YEARS, DurationWindow::All] {
            assert!(filter_by_duration(&empty, window, day(2024, 6, 15)).is_empty());
        }
        assert!(display_order(&empty).is_empty());
    }

    #[test]
    fn display_order_is_newest_first() {
        let input = series(&["2024-01-01", "2024-03-01", "2024-02-01"], &[70.0, 69.0, 68.0]);
        assert_eq!(display_order(&input), vec![1, 2, 0]);
    }

    #[test]
    fn display_order_is_stable_and_puts_invalid_last() {
        let input = series(
            &["bogus", "2024-02-01", "2024-03-01", "2024-02-01", "also bogus"],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
        );
        assert_eq!(display_order(&input), vec![2, 1, 3, 0, 4]);
    }
}
