use crate::errors::FeedError;
use crate::models::{AppData, BodyCompositionPayload, DailyRecord};
use crate::stats::monthly_statistics;
use crate::storage::daily_records;
use crate::view::{Dashboard, DashboardLoad};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// HTTP client for an upstream endpoint serving the `[daily, monthly]` array.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Request)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn fetch(&self) -> Result<BodyCompositionPayload, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FeedError::Request)?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let payload: BodyCompositionPayload = response.json().await.map_err(FeedError::Decode)?;
        debug!(
            "fetched {} daily and {} monthly records from {}",
            payload.daily().len(),
            payload.monthly().len(),
            self.url
        );
        Ok(payload)
    }
}

/// Where a page load gets its payload from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// The local store, or the sample set while the store is empty.
    Local { sample: Vec<DailyRecord> },
    Remote(FeedClient),
}

impl DataSource {
    /// The store is locked only while a local payload is built; remote
    /// fetches never hold it.
    pub async fn fetch(&self, data: &Mutex<AppData>) -> Result<BodyCompositionPayload, FeedError> {
        match self {
            Self::Local { sample } => {
                let data = data.lock().await;
                Ok(local_payload(&data, sample))
            }
            Self::Remote(client) => client.fetch().await,
        }
    }
}

pub fn local_payload(data: &AppData, sample: &[DailyRecord]) -> BodyCompositionPayload {
    let daily = if data.records.is_empty() {
        sample.to_vec()
    } else {
        daily_records(data)
    };
    let monthly = monthly_statistics(&daily);
    BodyCompositionPayload(daily, monthly)
}

pub fn into_dashboard(result: Result<BodyCompositionPayload, FeedError>) -> DashboardLoad {
    match result {
        Ok(payload) => DashboardLoad::Ready(Dashboard::from_payload(&payload)),
        Err(err) => {
            error!("body composition data unavailable: {err}");
            DashboardLoad::Unavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use crate::view::Granularity;
    use chrono::NaiveDate;

    fn sample() -> Vec<DailyRecord> {
        vec![DailyRecord {
            date: "2025-01-01".into(),
            weight: Some(95.0),
            body_fat: Some(27.0),
        }]
    }

    #[test]
    fn empty_store_serves_sample() {
        let payload = local_payload(&AppData::default(), &sample());
        assert_eq!(payload.daily(), sample().as_slice());
        assert_eq!(payload.monthly().len(), 1);
        assert_eq!(payload.monthly()[0].date, "2025-01");
    }

    #[test]
    fn stored_records_replace_sample() {
        let mut data = AppData::default();
        data.records.insert(
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            Measurement {
                weight: 70.0,
                body_fat: None,
            },
        );
        let payload = local_payload(&data, &sample());
        assert_eq!(payload.daily().len(), 1);
        assert_eq!(payload.daily()[0].date, "2025-03-02");
        assert_eq!(payload.monthly()[0].weight, Some(70.0));
    }

    #[tokio::test]
    async fn unreachable_remote_is_unavailable() {
        let client = FeedClient::new("http://127.0.0.1:9/api/body_composition", Duration::from_secs(2)).unwrap();
        let source = DataSource::Remote(client);
        let load = into_dashboard(source.fetch(&Mutex::new(AppData::default())).await);
        assert!(matches!(load, DashboardLoad::Unavailable(_)));
    }

    #[tokio::test]
    async fn local_source_is_ready() {
        let source = DataSource::Local { sample: sample() };
        match into_dashboard(source.fetch(&Mutex::new(AppData::default())).await) {
            DashboardLoad::Ready(dashboard) => {
                assert_eq!(dashboard.series(Granularity::Daily).len(), 1);
                assert_eq!(dashboard.series(Granularity::Monthly).len(), 1);
            }
            DashboardLoad::Unavailable(reason) => panic!("unexpected: {reason}"),
        }
    }
}
