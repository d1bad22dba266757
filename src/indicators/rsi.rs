// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent close-to-close changes as a
// 0–100 oscillator.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first
//          `window` gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (window - 1) + current_gain) / window
//            avg_loss = (prev_avg_loss * (window - 1) + current_loss) / window
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Flat-window policy: when both averages are zero (no movement at all) the
// oscillator reads its midpoint, 50.0; when only the loss average is zero
// (all gains) it is clamped to 100.0. Neither case produces NaN/Inf.
// =============================================================================

use super::{require, IndicatorError};

/// Compute the full RSI series for `closes` with the given `window`.
///
/// One value per close starting at index `window` (the first `window` deltas
/// seed the averages), oldest first.
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when `closes.len() < window + 1` (at least `window`
///   deltas are needed).
pub fn calculate_rsi(closes: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    require(closes.len(), window.saturating_add(1), window)?;

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Seed averages with the SMA of the first `window` deltas.
    let (sum_gain, sum_loss) = deltas[..window]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        });

    let window_f = window as f64;
    let mut avg_gain = sum_gain / window_f;
    let mut avg_loss = sum_loss / window_f;

    let mut result = Vec::with_capacity(deltas.len() - window + 1);
    result.push(rsi_from_averages(avg_gain, avg_loss));

    // Wilder's smoothing for the remaining deltas.
    for &delta in &deltas[window..] {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };

        avg_gain = (avg_gain * (window_f - 1.0) + gain) / window_f;
        avg_loss = (avg_loss * (window_f - 1.0) + loss) / window_f;

        result.push(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(result)
}

/// Most recent RSI value.
pub fn latest_rsi(closes: &[f64], window: usize) -> Result<f64, IndicatorError> {
    let series = calculate_rsi(closes, window)?;
    // Non-empty on success; the ok_or keeps this total anyway.
    series
        .last()
        .copied()
        .ok_or(IndicatorError::InsufficientData {
            required: window + 1,
            available: closes.len(),
        })
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // No movement at all.
    } else if avg_loss == 0.0 {
        100.0 // Only gains.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_window_zero() {
        assert_eq!(
            calculate_rsi(&[1.0, 2.0, 3.0], 0),
            Err(IndicatorError::ZeroWindow)
        );
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes give only 13 deltas; window 14 needs 15 closes.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert_eq!(
            calculate_rsi(&closes, 14),
            Err(IndicatorError::InsufficientData {
                required: 15,
                available: 14
            })
        );
    }

    #[test]
    fn rsi_all_gains_is_100() {
        // Strictly ascending closes: no losses, RSI pinned at 100.
        let closes: Vec<f64> = (10..30).map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14).unwrap();
        for v in series {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14).unwrap();
        for v in series {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_is_midpoint() {
        let closes = vec![100.0; 30];
        let series = calculate_rsi(&closes, 14).unwrap();
        for v in series {
            assert!((v - 50.0).abs() < 1e-10, "expected 50.0, got {v}");
        }
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = calculate_rsi(&closes, 14).unwrap();
        for v in series {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn latest_rsi_matches_series_tail() {
        let closes: Vec<f64> = (0..40).map(|x| 100.0 + (x as f64 * 0.9).sin() * 5.0).collect();
        let series = calculate_rsi(&closes, 14).unwrap();
        assert_eq!(latest_rsi(&closes, 14).unwrap(), *series.last().unwrap());
    }
}
