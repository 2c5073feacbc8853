use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<crate::view::ControlError> for AppError {
    fn from(err: crate::view::ControlError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        Self::service_unavailable(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Rejected measurement submissions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("date {0} is in the future")]
    FutureDate(String),
    #[error("weight must be between {min} and {max} kg, got {value}")]
    WeightOutOfRange { value: f64, min: f64, max: f64 },
    #[error("body fat must be between {min} and {max} %, got {value}")]
    BodyFatOutOfRange { value: f64, min: f64, max: f64 },
}

/// Failures fetching the `[daily, monthly]` payload.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to reach data source: {0}")]
    Request(#[source] reqwest::Error),
    #[error("data source answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode data source payload: {0}")]
    Decode(#[source] reqwest::Error),
}
