// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent values, making it more responsive to new
// information than the Simple Moving Average.
//
// Formula:
//   multiplier = 2 / (window + 1)
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `window`
// values, so on a series of exactly `window` points EMA == SMA.
// =============================================================================

use super::{require, IndicatorError};

/// Compute the EMA series for `values` with the given `window`.
///
/// The result holds one value per position starting at index `window - 1`,
/// oldest first. Which price field feeds `values` is the caller's choice
/// (the `series_type` request parameter).
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when `values.len() < window`.
pub fn calculate_ema(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    require(values.len(), window, window)?;

    let multiplier = 2.0 / (window + 1) as f64;

    // Seed: SMA of the first `window` values.
    let seed: f64 = values[..window].iter().sum::<f64>() / window as f64;

    let mut result = Vec::with_capacity(values.len() - window + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[window..] {
        let ema = value * multiplier + prev * (1.0 - multiplier);
        result.push(ema);
        prev = ema;
    }

    Ok(result)
}
