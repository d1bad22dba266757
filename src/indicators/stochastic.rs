// =============================================================================
// Stochastic Oscillator (%K / %D)
// =============================================================================
//
//   %K = 100 * (close - lowest_low) / (highest_high - lowest_low)
//        over the trailing `window` bars
//   %D = 3-period SMA of %K
//
// Flat-range policy: when the trailing window has zero range (highest high
// equals lowest low) the ratio is undefined; %K reads the midpoint, 50.0,
// instead of propagating NaN. With fewer than three %K values available the
// %D average covers what exists, so a series of exactly `window` bars still
// yields a result (%D == %K).
// =============================================================================

use serde::Serialize;

use super::{require, IndicatorError};
use crate::types::Bar;

/// Latest %K / %D pair, serialized with the oscillator's conventional names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticResult {
    #[serde(rename = "%K")]
    pub percent_k: f64,
    #[serde(rename = "%D")]
    pub percent_d: f64,
}

/// Compute the most recent stochastic oscillator values over `bars`
/// (oldest first).
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when `bars.len() < window`.
pub fn calculate_stochastic(bars: &[Bar], window: usize) -> Result<StochasticResult, IndicatorError> {
    require(bars.len(), window, window)?;

    // %K for every trailing position, oldest first.
    let k_series: Vec<f64> = bars
        .windows(window)
        .map(|chunk| percent_k(chunk))
        .collect();

    let percent_k = k_series
        .last()
        .copied()
        .ok_or(IndicatorError::InsufficientData {
            required: window,
            available: bars.len(),
        })?;

    // %D: SMA of the last (up to) three %K values.
    let d_len = k_series.len().min(3);
    let d_window = &k_series[k_series.len() - d_len..];
    let percent_d = d_window.iter().sum::<f64>() / d_len as f64;

    Ok(StochasticResult {
        percent_k,
        percent_d,
    })
}

/// %K over one window of bars. Flat range reads the midpoint.
fn percent_k(window: &[Bar]) -> f64 {
    let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let close = window.last().map(|b| b.close).unwrap_or(0.0);

    let range = highest - lowest;
    if range == 0.0 {
        return 50.0;
    }

    100.0 * (close - lowest) / range
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: "2024-01-02".to_string(),
            open: close,
            high,
            low,
            close,
            volume: 1,
        }
    }

    #[test]
    fn stochastic_window_zero() {
        let bars = vec![bar(2.0, 1.0, 1.5); 20];
        assert_eq!(
            calculate_stochastic(&bars, 0),
            Err(IndicatorError::ZeroWindow)
        );
    }

    #[test]
    fn stochastic_insufficient_data() {
        let bars = vec![bar(2.0, 1.0, 1.5); 5];
        assert_eq!(
            calculate_stochastic(&bars, 14),
            Err(IndicatorError::InsufficientData {
                required: 14,
                available: 5
            })
        );
    }

    #[test]
    fn stochastic_close_at_high_is_100() {
        // Close sits on the highest high of the window.
        let mut bars = vec![bar(10.0, 5.0, 7.0); 13];
        bars.push(bar(12.0, 6.0, 12.0));
        let result = calculate_stochastic(&bars, 14).unwrap();
        assert!((result.percent_k - 100.0).abs() < 1e-10);
    }

    #[test]
    fn stochastic_close_at_low_is_0() {
        let mut bars = vec![bar(10.0, 5.0, 7.0); 13];
        bars.push(bar(10.0, 4.0, 4.0));
        let result = calculate_stochastic(&bars, 14).unwrap();
        assert!(result.percent_k.abs() < 1e-10);
    }

    #[test]
    fn stochastic_flat_range_reads_midpoint() {
        // Every bar pinned to the same price: zero range, policy says 50.
        let bars = vec![bar(100.0, 100.0, 100.0); 20];
        let result = calculate_stochastic(&bars, 14).unwrap();
        assert_eq!(result.percent_k, 50.0);
        assert_eq!(result.percent_d, 50.0);
    }

    #[test]
    fn stochastic_k_in_range() {
        // Well-formed bars (high >= close >= low) keep %K in [0, 100].
        let bars: Vec<Bar> = (0..40)
            .map(|i| {
                let base = 50.0 + (i as f64 * 0.5).sin() * 10.0;
                bar(base + 2.0, base - 2.0, base + (i as f64 * 0.9).cos())
            })
            .collect();
        let result = calculate_stochastic(&bars, 14).unwrap();
        assert!((0.0..=100.0).contains(&result.percent_k));
        assert!((0.0..=100.0).contains(&result.percent_d));
    }

    #[test]
    fn stochastic_exact_window_d_equals_k() {
        // One %K value only, so %D averages just it.
        let bars: Vec<Bar> = (0..14)
            .map(|i| bar(10.0 + i as f64, 5.0 + i as f64, 8.0 + i as f64))
            .collect();
        let result = calculate_stochastic(&bars, 14).unwrap();
        assert_eq!(result.percent_k, result.percent_d);
    }
}
