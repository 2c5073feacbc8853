use crate::errors::{AppError, RecordError};
use crate::models::{AppData, DailyRecord, FormDefaults, Measurement, RecordRequest};
use chrono::NaiveDate;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub const MIN_WEIGHT: f64 = 0.1;
pub const MAX_WEIGHT: f64 = 300.0;
pub const MIN_BODY_FAT: f64 = 0.0;
pub const MAX_BODY_FAT: f64 = 99.9;

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Checks a submission against the accepted ranges.
pub fn validate(request: &RecordRequest, today: NaiveDate) -> Result<(NaiveDate, Measurement), RecordError> {
    let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(request.date.clone()))?;
    if date > today {
        return Err(RecordError::FutureDate(date.to_string()));
    }

    let weight = request.weight;
    if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(RecordError::WeightOutOfRange {
            value: weight,
            min: MIN_WEIGHT,
            max: MAX_WEIGHT,
        });
    }

    if let Some(body_fat) = request.body_fat {
        if !(MIN_BODY_FAT..=MAX_BODY_FAT).contains(&body_fat) {
            return Err(RecordError::BodyFatOutOfRange {
                value: body_fat,
                min: MIN_BODY_FAT,
                max: MAX_BODY_FAT,
            });
        }
    }

    Ok((
        date,
        Measurement {
            weight,
            body_fat: request.body_fat,
        },
    ))
}

/// Inserts or replaces the entry for the request's date. Returns `false`
/// when the stored entry already matched.
pub fn upsert(
    data: &mut AppData,
    request: &RecordRequest,
    today: NaiveDate,
) -> Result<(NaiveDate, Measurement, bool), RecordError> {
    let (date, measurement) = validate(request, today)?;
    let changed = data.records.insert(date, measurement) != Some(measurement);
    Ok((date, measurement, changed))
}

/// Prefill for the record form: today's entry, else the latest, else zeros.
pub fn form_defaults(data: &AppData, today: NaiveDate) -> FormDefaults {
    let entry = data
        .records
        .get(&today)
        .or_else(|| data.records.values().next_back());

    match entry {
        Some(measurement) => FormDefaults {
            weight: measurement.weight,
            body_fat: measurement.body_fat,
        },
        None => FormDefaults {
            weight: 0.0,
            body_fat: Some(0.0),
        },
    }
}

pub fn daily_records(data: &AppData) -> Vec<DailyRecord> {
    data.records
        .iter()
        .map(|(date, measurement)| DailyRecord {
            date: date.to_string(),
            weight: Some(measurement.weight),
            body_fat: measurement.body_fat,
        })
        .collect()
}
