use crate::models::{DailyRecord, MonthlyRecord};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct MonthSums {
    weight_sum: f64,
    weight_count: u32,
    body_fat_sum: f64,
    body_fat_count: u32,
}

impl MonthSums {
    fn weight(&self) -> Option<f64> {
        mean(self.weight_sum, self.weight_count)
    }

    fn body_fat(&self) -> Option<f64> {
        mean(self.body_fat_sum, self.body_fat_count)
    }
}

/// Aggregates daily records into one row per calendar month, covering every
/// month from the first record to the last. Records with an unparseable date
/// are skipped.
pub fn monthly_statistics(records: &[DailyRecord]) -> Vec<MonthlyRecord> {
    let mut months: BTreeMap<(i32, u32), MonthSums> = BTreeMap::new();
    for record in records {
        let Ok(date) = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d") else {
            continue;
        };
        let sums = months.entry((date.year(), date.month())).or_default();
        if let Some(weight) = record.weight.filter(|value| value.is_finite()) {
            sums.weight_sum += weight;
            sums.weight_count += 1;
        }
        if let Some(body_fat) = record.body_fat.filter(|value| value.is_finite()) {
            sums.body_fat_sum += body_fat;
            sums.body_fat_count += 1;
        }
    }

    let (Some(&first), Some(&last)) = (months.keys().next(), months.keys().next_back()) else {
        return Vec::new();
    };

    let empty = MonthSums::default();
    let mut output = Vec::new();
    let mut previous_weight: Option<f64> = None;
    let mut cursor = first;
    while cursor <= last {
        let sums = months.get(&cursor).unwrap_or(&empty);
        let weight = sums.weight();
        let weight_change_rate = match (weight, previous_weight) {
            (Some(current), Some(previous)) if previous != 0.0 => {
                Some(round2((current - previous) / previous * 100.0))
            }
            _ => None,
        };

        output.push(MonthlyRecord {
            date: format!("{:04}-{:02}", cursor.0, cursor.1),
            weight,
            body_fat: sums.body_fat(),
            weight_change_rate,
        });

        previous_weight = weight;
        cursor = next_month(cursor);
    }

    output
}

fn mean(sum: f64, count: u32) -> Option<f64> {
    (count > 0).then(|| round2(sum / f64::from(count)))
}

fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
