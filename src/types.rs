// =============================================================================
// Shared types used across the MarketDesk backend
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A single OHLCV bar for one trading period, normalized from the upstream
/// payload. `date` is an ISO date (`YYYY-MM-DD`) for daily data or an ISO
/// timestamp (`YYYY-MM-DD HH:MM:SS`) for intraday data, so lexicographic
/// ordering is chronological ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Select one price field by series type.
    pub fn field(&self, field: SeriesField) -> f64 {
        match field {
            SeriesField::Open => self.open,
            SeriesField::High => self.high,
            SeriesField::Low => self.low,
            SeriesField::Close => self.close,
        }
    }
}

/// Which price field an indicator reads from each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Open,
    High,
    Low,
    Close,
}

impl SeriesField {
    /// Parse the `series_type` query parameter. Unknown values are a
    /// client-correctable error.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            other => Err(ApiError::BadParameter(format!(
                "invalid series_type '{other}': use open, high, low or close"
            ))),
        }
    }
}

impl std::fmt::Display for SeriesField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Intraday steps the upstream accepts.
const INTRADAY_STEPS: [&str; 5] = ["1min", "5min", "15min", "30min", "60min"];

/// Sampling interval of the requested quote series. The upstream exposes one
/// function per family (daily, weekly, monthly, intraday), with the intraday
/// step encoded as a request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
    Intraday(&'static str),
}

impl Interval {
    /// Parse the `interval` query parameter.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "daily" => return Ok(Self::Daily),
            "weekly" => return Ok(Self::Weekly),
            "monthly" => return Ok(Self::Monthly),
            _ => {}
        }
        if let Some(&step) = INTRADAY_STEPS.iter().find(|&&step| step == lower) {
            return Ok(Self::Intraday(step));
        }
        Err(ApiError::BadParameter(format!(
            "invalid interval '{s}': use daily, weekly, monthly, 1min, 5min, 15min, 30min or 60min"
        )))
    }

    /// Key under which the upstream nests the time-series object.
    pub fn payload_key(&self) -> String {
        match self {
            Self::Daily => "Time Series (Daily)".to_string(),
            Self::Weekly => "Weekly Time Series".to_string(),
            Self::Monthly => "Monthly Time Series".to_string(),
            Self::Intraday(step) => format!("Time Series ({step})"),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Intraday(step) => write!(f, "{step}"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_field_parses_case_insensitively() {
        assert_eq!(SeriesField::parse("Close").unwrap(), SeriesField::Close);
        assert_eq!(SeriesField::parse("OPEN").unwrap(), SeriesField::Open);
    }

    #[test]
    fn series_field_rejects_unknown() {
        assert!(SeriesField::parse("volume").is_err());
    }

    #[test]
    fn interval_parses_all_families() {
        assert_eq!(Interval::parse("daily").unwrap(), Interval::Daily);
        assert_eq!(Interval::parse("weekly").unwrap(), Interval::Weekly);
        assert_eq!(Interval::parse("Monthly").unwrap(), Interval::Monthly);
        assert_eq!(
            Interval::parse("5min").unwrap(),
            Interval::Intraday("5min")
        );
    }

    #[test]
    fn interval_rejects_unknown() {
        assert!(Interval::parse("yearly").is_err());
        assert!(Interval::parse("3min").is_err());
    }

    #[test]
    fn payload_key_matches_upstream_contract() {
        assert_eq!(Interval::Daily.payload_key(), "Time Series (Daily)");
        assert_eq!(Interval::Weekly.payload_key(), "Weekly Time Series");
        assert_eq!(Interval::Monthly.payload_key(), "Monthly Time Series");
        assert_eq!(
            Interval::Intraday("5min").payload_key(),
            "Time Series (5min)"
        );
    }

    #[test]
    fn bar_field_selects_requested_price() {
        let bar = Bar {
            date: "2024-01-02".to_string(),
            open: 1.0,
            high: 4.0,
            low: 0.5,
            close: 2.0,
            volume: 100,
        };
        assert_eq!(bar.field(SeriesField::Open), 1.0);
        assert_eq!(bar.field(SeriesField::High), 4.0);
        assert_eq!(bar.field(SeriesField::Low), 0.5);
        assert_eq!(bar.field(SeriesField::Close), 2.0);
    }
}
