// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The arithmetic mean of the last `window` values, recomputed at every
// trailing position:
//
//   SMA_t = (v_{t-window+1} + ... + v_t) / window
//
// The series is maintained with a rolling sum so the whole computation is
// O(n) rather than O(n * window).
// =============================================================================

use super::{require, IndicatorError};

/// Compute the full SMA series for `values` with the given `window`.
///
/// The result holds one value per trailing position, oldest first: element 0
/// covers `values[0..window]`, the last element covers the final `window`
/// values.
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when `values.len() < window`.
pub fn calculate_sma(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    require(values.len(), window, window)?;

    let window_f = window as f64;
    let mut sum: f64 = values[..window].iter().sum();

    let mut result = Vec::with_capacity(values.len() - window + 1);
    result.push(sum / window_f);

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        result.push(sum / window_f);
    }

    Ok(result)
}

/// Most recent SMA value.
pub fn latest_sma(values: &[f64], window: usize) -> Result<f64, IndicatorError> {
    require(values.len(), window, window)?;
    let window_f = window as f64;
    Ok(values[values.len() - window..].iter().sum::<f64>() / window_f)
}
