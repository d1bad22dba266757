// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line  = EMA(fast) - EMA(slow)
// Signal     = EMA(signal) of the MACD line
// Histogram  = MACD line - Signal
//
// Both EMAs are SMA-seeded (see `ema.rs`). The MACD line is defined from the
// first index where the slow EMA exists; the signal line is an EMA over that
// difference series.
// =============================================================================

use serde::Serialize;

use super::{ema::calculate_ema, require, IndicatorError};

/// Latest MACD line, signal line, and histogram values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute the most recent MACD values for `closes`.
///
/// # Errors
/// - `ZeroWindow` when any of `fast`, `slow`, or `signal` is zero.
/// - `InsufficientData` when `closes.len() < slow + signal` (enough bars for
///   a stable slow EMA plus a full signal warm-up).
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdResult, IndicatorError> {
    let shortest = fast.min(slow).min(signal);
    require(closes.len(), slow + signal, shortest)?;

    let fast_ema = calculate_ema(closes, fast)?;
    let slow_ema = calculate_ema(closes, slow)?;

    // Both EMA series end at the last close; align them from the tail. The
    // shorter series bounds the MACD line.
    let len = fast_ema.len().min(slow_ema.len());
    let fast_tail = &fast_ema[fast_ema.len() - len..];
    let slow_tail = &slow_ema[slow_ema.len() - len..];

    let macd_line: Vec<f64> = fast_tail
        .iter()
        .zip(slow_tail.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_series = calculate_ema(&macd_line, signal)?;

    // Both series are non-empty on success; the ok_or keeps this total.
    let insufficient = IndicatorError::InsufficientData {
        required: slow + signal,
        available: closes.len(),
    };
    let macd = macd_line.last().copied().ok_or(insufficient)?;
    let signal_value = signal_series.last().copied().ok_or(insufficient)?;

    Ok(MacdResult {
        macd,
        signal: signal_value,
        histogram: macd - signal_value,
    })
}
