use crate::models::DailyRecord;
use crate::stats::round2;
use chrono::{Duration, NaiveDate};

pub const SAMPLE_DAYS: u32 = 365 * 3;

const MIN_WEIGHT: f64 = 50.0;
const MIN_BODY_FAT: f64 = 5.0;

/// Random-walk sample data, one record per day from `today - days` through
/// `today`. The same seed always produces the same walk.
pub fn generate_sample_data(today: NaiveDate, days: u32, seed: u64) -> Vec<DailyRecord> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut uniform = |low: f64, high: f64| round2(low + (high - low) * rng.f64());

    let mut weight = uniform(90.0, 100.0);
    let mut body_fat = uniform(25.0, 30.0);

    let mut records = Vec::with_capacity(days as usize + 1);
    for offset in (0..=i64::from(days)).rev() {
        weight = round2((weight + uniform(-0.4, 0.36)).max(MIN_WEIGHT));
        body_fat = round2((body_fat + uniform(-0.2, 0.18)).max(MIN_BODY_FAT));

        records.push(DailyRecord {
            date: (today - Duration::days(offset)).to_string(),
            weight: Some(weight),
            body_fat: Some(body_fat),
        });
    }

    records
}
