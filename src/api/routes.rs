// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/`. Every request is one fetch-reshape-
// respond cycle: fetch the series from the upstream, run the indicator
// engine, serialize. A failed indicator computation fails the whole request
// with the underlying error; no indicator is ever silently omitted.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::ApiError;
use crate::indicators::{
    adx::calculate_adx,
    bollinger::{calculate_bollinger, BollingerResult},
    ema::calculate_ema,
    macd::{calculate_macd, MacdResult},
    obv::calculate_obv,
    rsi::latest_rsi,
    sma::{calculate_sma, latest_sma},
    stochastic::{calculate_stochastic, StochasticResult},
};
use crate::types::{Bar, Interval, SeriesField};
use crate::upstream::UpstreamClient;

// Indicator parameters for the bundled snapshot.
const MA_WINDOW: usize = 10;
const RSI_WINDOW: usize = 14;
const ADX_WINDOW: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
const BOLLINGER_WINDOW: usize = 20;
const BOLLINGER_NUM_STD: f64 = 2.0;
const STOCHASTIC_WINDOW: usize = 14;

/// Trailing SMA/EMA points returned per request, and bars echoed in the
/// stock snapshot's time series.
const MAX_TRAILING_POINTS: usize = 10;

// =============================================================================
// Router construction
// =============================================================================

/// Shared per-process state: just the upstream client. Per-request data is
/// owned and stack-local, so no locks are needed anywhere.
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/stock/:symbol", get(stock_snapshot))
        .route("/api/sma/:symbol", get(sma_series))
        .route("/api/ema/:symbol", get(ema_series))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Stock snapshot — latest bar + recent series + indicator bundle
// =============================================================================

/// Price fields of one bar without its date (the date is the map key or a
/// sibling field).
#[derive(Debug, Serialize)]
struct BarValues {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<&Bar> for BarValues {
    fn from(bar: &Bar) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// The full indicator bundle. Field names follow the front-end contract.
#[derive(Debug, Serialize)]
struct IndicatorBundle {
    #[serde(rename = "MA")]
    ma: f64,
    #[serde(rename = "RSI")]
    rsi: f64,
    #[serde(rename = "ADX")]
    adx: f64,
    /// Full `{macd, signal, histogram}` record. Consumers wanting the bare
    /// MACD line value read its `macd` field.
    #[serde(rename = "MACD")]
    macd: MacdResult,
    #[serde(rename = "Bollinger Bands")]
    bollinger: BollingerResult,
    #[serde(rename = "OBV")]
    obv: i64,
    #[serde(rename = "Stochastic Oscillator")]
    stochastic: StochasticResult,
}

#[derive(Serialize)]
struct StockResponse {
    symbol: String,
    date: String,
    latest_data: BarValues,
    time_series: BTreeMap<String, BarValues>,
    indicators: IndicatorBundle,
}

async fn stock_snapshot(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<StockResponse>, ApiError> {
    let symbol = symbol.to_uppercase();
    info!(symbol = %symbol, "stock snapshot requested");

    let bars = state.upstream.fetch_series(&symbol, &Interval::Daily).await?;
    let latest = bars.last().ok_or_else(|| {
        ApiError::DataUnavailable(format!("empty time series for symbol: {symbol}"))
    })?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let indicators = IndicatorBundle {
        ma: latest_sma(&closes, MA_WINDOW)?,
        rsi: latest_rsi(&closes, RSI_WINDOW)?,
        adx: calculate_adx(&bars, ADX_WINDOW)?,
        macd: calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?,
        bollinger: calculate_bollinger(&closes, BOLLINGER_WINDOW, BOLLINGER_NUM_STD)?,
        obv: calculate_obv(&bars)?,
        stochastic: calculate_stochastic(&bars, STOCHASTIC_WINDOW)?,
    };

    let time_series: BTreeMap<String, BarValues> = bars
        .iter()
        .rev()
        .take(MAX_TRAILING_POINTS)
        .map(|bar| (bar.date.clone(), BarValues::from(bar)))
        .collect();

    Ok(Json(StockResponse {
        date: latest.date.clone(),
        latest_data: BarValues::from(latest),
        time_series,
        indicators,
        symbol,
    }))
}

// =============================================================================
// Trailing SMA series
// =============================================================================

fn default_interval() -> String {
    "daily".to_string()
}

fn default_time_period() -> String {
    "10".to_string()
}

fn default_series_type() -> String {
    "close".to_string()
}

/// Parse the `time_period` query parameter. Taken as a string so a malformed
/// value surfaces as the JSON error body instead of the extractor's
/// plain-text rejection.
fn parse_time_period(s: &str) -> Result<usize, ApiError> {
    s.trim().parse().map_err(|_| {
        ApiError::BadParameter(format!(
            "invalid time_period '{s}': must be a positive integer"
        ))
    })
}

#[derive(Deserialize)]
struct SmaQuery {
    #[serde(default = "default_interval")]
    interval: String,
    #[serde(default = "default_time_period")]
    time_period: String,
}

#[derive(Debug, Serialize)]
struct SmaPoint {
    date: String,
    sma: f64,
}

#[derive(Serialize)]
struct SmaResponse {
    symbol: String,
    interval: String,
    time_period: usize,
    sma_data: Vec<SmaPoint>,
}

async fn sma_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<SmaQuery>,
) -> Result<Json<SmaResponse>, ApiError> {
    let symbol = symbol.to_uppercase();
    let interval = Interval::parse(&query.interval)?;
    let time_period = parse_time_period(&query.time_period)?;
    info!(symbol = %symbol, interval = %interval, time_period, "SMA series requested");

    let bars = state.upstream.fetch_series(&symbol, &interval).await?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let series = calculate_sma(&closes, time_period)?;

    let sma_data = trailing_points(&bars, &series, time_period)
        .map(|(date, sma)| SmaPoint { date, sma })
        .collect();

    Ok(Json(SmaResponse {
        interval: interval.to_string(),
        time_period,
        sma_data,
        symbol,
    }))
}

// =============================================================================
// Trailing EMA series
// =============================================================================

#[derive(Deserialize)]
struct EmaQuery {
    #[serde(default = "default_interval")]
    interval: String,
    #[serde(default = "default_time_period")]
    time_period: String,
    #[serde(default = "default_series_type")]
    series_type: String,
}

#[derive(Debug, Serialize)]
struct EmaPoint {
    date: String,
    ema: f64,
}

#[derive(Serialize)]
struct EmaResponse {
    symbol: String,
    interval: String,
    time_period: usize,
    series_type: String,
    ema_data: Vec<EmaPoint>,
}

async fn ema_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<EmaQuery>,
) -> Result<Json<EmaResponse>, ApiError> {
    let symbol = symbol.to_uppercase();
    let interval = Interval::parse(&query.interval)?;
    let time_period = parse_time_period(&query.time_period)?;
    let field = SeriesField::parse(&query.series_type)?;
    info!(
        symbol = %symbol,
        interval = %interval,
        time_period,
        series_type = %field,
        "EMA series requested"
    );

    let bars = state.upstream.fetch_series(&symbol, &interval).await?;
    let values: Vec<f64> = bars.iter().map(|b| b.field(field)).collect();
    let series = calculate_ema(&values, time_period)?;

    let ema_data = trailing_points(&bars, &series, time_period)
        .map(|(date, ema)| EmaPoint { date, ema })
        .collect();

    Ok(Json(EmaResponse {
        interval: interval.to_string(),
        time_period,
        series_type: field.to_string(),
        ema_data,
        symbol,
    }))
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Pair the last `MAX_TRAILING_POINTS` values of an indicator series with the
/// dates of the bars they were computed at, newest first. `series[i]` covers
/// the window ending at `bars[i + window - 1]`.
fn trailing_points<'a>(
    bars: &'a [Bar],
    series: &'a [f64],
    window: usize,
) -> impl Iterator<Item = (String, f64)> + 'a {
    let take = series.len().min(MAX_TRAILING_POINTS);
    (series.len() - take..series.len())
        .rev()
        .map(move |i| (bars[i + window - 1].date.clone(), series[i]))
}
