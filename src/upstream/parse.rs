// =============================================================================
// Upstream payload normalization — pure, HTTP-free
// =============================================================================
//
// The upstream nests one object per period under a function-specific key
// (`"Time Series (Daily)"`, `"Time Series (5min)"`, ...), with numbered
// field names inside each entry:
//
//   "2024-01-02": {
//       "1. open": "187.15", "2. high": "188.44", "3. low": "183.89",
//       "4. close": "185.64", "5. volume": "82488700"
//   }
//
// Before the series key is even consulted, the payload is triaged for the
// upstream's error envelopes: a "Note"/"Information" key signals a quota or
// throttle condition, an "Error Message" key signals an unknown symbol.
//
// Entries with missing, empty, or placeholder ("NA"/"NaN") values are
// dropped individually; the surviving bars are returned ascending by date.
// =============================================================================

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::types::Bar;

/// Numbered field keys inside each time-series entry.
const KEY_OPEN: &str = "1. open";
const KEY_HIGH: &str = "2. high";
const KEY_LOW: &str = "3. low";
const KEY_CLOSE: &str = "4. close";
const KEY_VOLUME: &str = "5. volume";

/// Normalize a raw upstream payload into an ascending-by-date bar series.
///
/// `series_key` is the function-specific key the series is nested under;
/// `symbol` is only used for error messages.
pub fn parse_series(payload: &Value, symbol: &str, series_key: &str) -> Result<Vec<Bar>, ApiError> {
    // Error-envelope triage comes first: the upstream returns 200 OK with an
    // explanatory object for both throttling and unknown symbols.
    if payload.get("Note").is_some() || payload.get("Information").is_some() {
        return Err(ApiError::UpstreamRateLimited);
    }
    if payload.get("Error Message").is_some() {
        return Err(ApiError::InvalidSymbol(symbol.to_string()));
    }

    let series = payload
        .get(series_key)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ApiError::DataUnavailable(format!(
                "no '{series_key}' data found for symbol: {symbol}"
            ))
        })?;

    let mut bars: Vec<Bar> = series
        .iter()
        .filter_map(|(date, fields)| {
            let bar = Bar {
                date: date.clone(),
                open: num_field(fields, KEY_OPEN)?,
                high: num_field(fields, KEY_HIGH)?,
                low: num_field(fields, KEY_LOW)?,
                close: num_field(fields, KEY_CLOSE)?,
                volume: volume_field(fields, KEY_VOLUME)?,
            };
            Some(bar)
        })
        .collect();

    let dropped = series.len() - bars.len();
    if dropped > 0 {
        debug!(symbol = %symbol, dropped, "dropped entries with non-numeric fields");
    }

    // ISO date strings order chronologically when sorted lexicographically.
    bars.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(bars)
}

/// Extract one numeric field. The upstream serializes numbers as strings;
/// placeholder values ("", "NA", "NaN") and non-finite parses are rejected.
fn num_field(entry: &Value, key: &str) -> Option<f64> {
    let value = entry.get(key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

/// Extract the volume field as a non-negative integer.
fn volume_field(entry: &Value, key: &str) -> Option<u64> {
    let v = num_field(entry, key)?;
    (v >= 0.0).then_some(v as u64)
}
