use crate::models::{DailyRecord, MonthlyRecord};
use chrono::{DateTime, NaiveDate};

/// A date label as received from the data source, with its parsed calendar
/// date. Unparseable labels keep `parsed == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDate {
    label: String,
    parsed: Option<NaiveDate>,
}

impl SeriesDate {
    pub fn parse(label: impl Into<String>) -> Self {
        let label = label.into();
        let parsed = parse_date(&label);
        Self { label, parsed }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // Monthly labels ("2024-05") resolve to the first day of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|value| value.date_naive())
}

/// Columnar body-composition series. Every column has the same length and
/// index `i` refers to the same observation in all of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementSeries {
    dates: Vec<SeriesDate>,
    weight: Vec<Option<f64>>,
    body_fat: Vec<Option<f64>>,
    weight_change_rate: Option<Vec<Option<f64>>>,
}

impl MeasurementSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_daily(records: &[DailyRecord]) -> Self {
        let mut series = Self {
            dates: Vec::with_capacity(records.len()),
            weight: Vec::with_capacity(records.len()),
            body_fat: Vec::with_capacity(records.len()),
            weight_change_rate: None,
        };
        for record in records {
            series.dates.push(SeriesDate::parse(record.date.as_str()));
            series.weight.push(record.weight);
            series.body_fat.push(record.body_fat);
        }
        series
    }

    pub fn from_monthly(records: &[MonthlyRecord]) -> Self {
        let mut rates = Vec::with_capacity(records.len());
        let mut series = Self {
            dates: Vec::with_capacity(records.len()),
            weight: Vec::with_capacity(records.len()),
            body_fat: Vec::with_capacity(records.len()),
            weight_change_rate: None,
        };
        for record in records {
            series.dates.push(SeriesDate::parse(record.date.as_str()));
            series.weight.push(record.weight);
            series.body_fat.push(record.body_fat);
            rates.push(record.weight_change_rate);
        }
        series.weight_change_rate = Some(rates);
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[SeriesDate] {
        &self.dates
    }

    pub fn weight(&self) -> &[Option<f64>] {
        &self.weight
    }

    pub fn body_fat(&self) -> &[Option<f64>] {
        &self.body_fat
    }

    pub fn weight_change_rate(&self) -> Option<&[Option<f64>]> {
        self.weight_change_rate.as_deref()
    }

    pub fn has_change_rate(&self) -> bool {
        self.weight_change_rate.is_some()
    }

    /// Builds a new series from the given indices, in the given order, taking
    /// every column together. Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Self {
        let indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < self.len())
            .collect();

        Self {
            dates: indices.iter().map(|&i| self.dates[i].clone()).collect(),
            weight: indices.iter().map(|&i| self.weight[i]).collect(),
            body_fat: indices.iter().map(|&i| self.body_fat[i]).collect(),
            weight_change_rate: self
                .weight_change_rate
                .as_ref()
                .map(|rates| indices.iter().map(|&i| rates[i]).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(date: &str, weight: f64) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            weight: Some(weight),
            body_fat: None,
        }
    }

    #[test]
    fn parses_supported_date_formats() {
        let ymd = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(SeriesDate::parse("2024-05-17").date(), Some(ymd));
        assert_eq!(
            SeriesDate::parse("2024-05").date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(SeriesDate::parse("2024-05-17T08:30:00Z").date(), Some(ymd));
        assert_eq!(SeriesDate::parse("not a date").date(), None);
        assert_eq!(SeriesDate::parse("2024-13-01").date(), None);
        assert_eq!(SeriesDate::parse("not a date").label(), "not a date");
    }

    #[test]
    fn monthly_series_carries_change_rate_column() {
        let records = vec![
            MonthlyRecord {
                date: "2024-01".into(),
                weight: Some(70.0),
                body_fat: Some(20.0),
                weight_change_rate: None,
            },
            MonthlyRecord {
                date: "2024-02".into(),
                weight: Some(69.3),
                body_fat: None,
                weight_change_rate: Some(-1.0),
            },
        ];
        let series = MeasurementSeries::from_monthly(&records);
        assert_eq!(series.len(), 2);
        assert!(series.has_change_rate());
        assert_eq!(series.weight_change_rate(), Some(&[None, Some(-1.0)][..]));

        let daily = MeasurementSeries::from_daily(&[daily("2024-01-01", 70.0)]);
        assert!(!daily.has_change_rate());
    }

    #[test]
    fn select_keeps_columns_aligned() {
        let series = MeasurementSeries::from_daily(&[
            daily("2024-01-01", 70.0),
            daily("2024-01-02", 71.0),
            daily("2024-01-03", 72.0),
        ]);
        let picked = series.select(&[2, 0, 9]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.dates()[0].label(), "2024-01-03");
        assert_eq!(picked.weight()[0], Some(72.0));
        assert_eq!(picked.dates()[1].label(), "2024-01-01");
        assert_eq!(picked.weight()[1], Some(70.0));
        assert_eq!(picked.body_fat().len(), 2);
    }
}
