// =============================================================================
// Request-level error type and HTTP mapping
// =============================================================================
//
// Every failure a request can hit is recovered at the handler boundary and
// surfaced as a `{"error": "..."}` JSON body with the matching status code.
// Nothing here is fatal to the process.
//
// Status mapping:
//   InvalidSymbol                            -> 404
//   DataUnavailable / InsufficientData /
//   BadParameter                             -> 400
//   UpstreamRateLimited / NetworkFailure     -> 500
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::indicators::IndicatorError;

/// Everything that can go wrong while serving one request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream reported that the symbol does not exist.
    #[error("invalid stock symbol: {0}")]
    InvalidSymbol(String),

    /// The upstream signalled a quota or throttle condition.
    #[error("upstream API limit reached, try again later")]
    UpstreamRateLimited,

    /// The expected payload key was missing or the payload was malformed.
    #[error("no data available: {0}")]
    DataUnavailable(String),

    /// The fetched series is too short for a requested indicator.
    #[error("insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// A query parameter failed to parse.
    #[error("{0}")]
    BadParameter(String),

    /// The upstream call itself failed (DNS, TLS, timeout, non-JSON body).
    #[error("network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSymbol(_) => StatusCode::NOT_FOUND,
            Self::DataUnavailable(_)
            | Self::InsufficientData { .. }
            | Self::BadParameter(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamRateLimited | Self::NetworkFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<IndicatorError> for ApiError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData {
                required,
                available,
            } => Self::InsufficientData {
                required,
                available,
            },
            IndicatorError::ZeroWindow => {
                Self::BadParameter("time_period must be greater than zero".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
