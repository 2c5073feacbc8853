use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub weight: f64,
    #[serde(default)]
    pub body_fat: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub records: BTreeMap<NaiveDate, Measurement>,
}

/// One observation of the daily table in the `[daily, monthly]` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
}

/// One month of the monthly table. `weight_change_rate` comes from the data
/// source as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub date: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub weight_change_rate: Option<f64>,
}

/// Serialized as a two-element JSON array: `[dailyRecords, monthlyRecords]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BodyCompositionPayload(pub Vec<DailyRecord>, pub Vec<MonthlyRecord>);

impl BodyCompositionPayload {
    pub fn daily(&self) -> &[DailyRecord] {
        &self.0
    }

    pub fn monthly(&self) -> &[MonthlyRecord] {
        &self.1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    pub date: String,
    pub weight: f64,
    #[serde(default)]
    pub body_fat: Option<f64>,
}

/// Fields as posted by the HTML form; body fat may be left blank.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordForm {
    pub date: String,
    pub weight: String,
    #[serde(default)]
    pub body_fat: String,
}

impl RecordForm {
    pub fn into_request(self) -> Result<RecordRequest, String> {
        let weight = self
            .weight
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("weight '{}' is not a number", self.weight))?;
        let body_fat = match self.body_fat.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|_| format!("body fat '{raw}' is not a number"))?,
            ),
        };
        Ok(RecordRequest {
            date: self.date,
            weight,
            body_fat,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub date: String,
    pub weight: f64,
    pub body_fat: Option<f64>,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormDefaults {
    pub weight: f64,
    /// `None` leaves the field blank so an unedited form stays without body fat.
    pub body_fat: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub granularity: Option<String>,
    pub duration: Option<String>,
    pub changed: Option<String>,
}
