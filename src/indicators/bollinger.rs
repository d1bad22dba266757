// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A middle band (SMA over the trailing window) flanked by an upper band
// (SMA + k*σ) and a lower band (SMA - k*σ), where σ is the population
// standard deviation of the same window. On a flat window σ is zero and all
// three bands coincide.
// =============================================================================

use serde::Serialize;

use super::{require, IndicatorError};

/// Latest Bollinger Band values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Compute the most recent Bollinger Bands for `closes`.
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when `closes.len() < window`.
pub fn calculate_bollinger(
    closes: &[f64],
    window: usize,
    num_std: f64,
) -> Result<BollingerResult, IndicatorError> {
    require(closes.len(), window, window)?;

    let tail = &closes[closes.len() - window..];
    let middle = tail.iter().sum::<f64>() / window as f64;

    let variance = tail.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / window as f64;
    let std_dev = variance.sqrt();

    Ok(BollingerResult {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    })
}
