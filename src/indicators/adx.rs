// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend strength regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (window) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   6. ADX = Wilder's smoothed average of DX over `window` bars.
// =============================================================================

use super::{require, IndicatorError};
use crate::types::Bar;

/// Compute the most recent ADX value from a slice of OHLCV bars
/// (oldest first).
///
/// # Errors
/// - `ZeroWindow` when `window == 0`.
/// - `InsufficientData` when there are fewer than `2 * window + 1` bars
///   (`window` bars for the initial smoothing of +DM/-DM/TR, another
///   `window` DX values to seed the ADX average, plus the first bar that
///   has no predecessor).
pub fn calculate_adx(bars: &[Bar], window: usize) -> Result<f64, IndicatorError> {
    let required = 2 * window + 1;
    require(bars.len(), required, window)?;

    let window_f = window as f64;
    let transitions = bars.len() - 1;

    // ------------------------------------------------------------------
    // Step 1 & 2: Raw +DM, -DM, and True Range per consecutive pair
    // ------------------------------------------------------------------
    let mut plus_dm = Vec::with_capacity(transitions);
    let mut minus_dm = Vec::with_capacity(transitions);
    let mut tr_vals = Vec::with_capacity(transitions);

    for pair in bars.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        let tr = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Step 3–5: Wilder's smoothing of +DM, -DM, TR, then DX per bar
    // ------------------------------------------------------------------
    let mut smooth_plus_dm: f64 = plus_dm[..window].iter().sum();
    let mut smooth_minus_dm: f64 = minus_dm[..window].iter().sum();
    let mut smooth_tr: f64 = tr_vals[..window].iter().sum();

    let mut dx_values = Vec::with_capacity(transitions - window + 1);
    dx_values.push(compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr));

    for i in window..transitions {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / window_f + plus_dm[i];
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / window_f + minus_dm[i];
        smooth_tr = smooth_tr - smooth_tr / window_f + tr_vals[i];

        dx_values.push(compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr));
    }

    // ------------------------------------------------------------------
    // Step 6: ADX = Wilder's smoothed average of DX
    // ------------------------------------------------------------------
    let mut adx: f64 = dx_values[..window].iter().sum::<f64>() / window_f;
    for &dx in &dx_values[window..] {
        adx = (adx * (window_f - 1.0) + dx) / window_f;
    }

    Ok(adx)
}

/// DX from smoothed +DM, -DM, and TR. A zero smoothed TR (every bar pinned
/// to the same price) carries no directional information, so DX is 0.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> f64 {
    if smooth_tr == 0.0 {
        return 0.0;
    }

    let plus_di = (smooth_plus_dm / smooth_tr) * 100.0;
    let minus_di = (smooth_minus_dm / smooth_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return 0.0;
    }

    ((plus_di - minus_di).abs() / di_sum) * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            date: "2024-01-02".to_string(),
            open,
            high,
            low,
            close,
            volume: 1,
        }
    }

    #[test]
    fn adx_window_zero() {
        let bars = vec![bar(1.0, 2.0, 0.5, 1.5); 50];
        assert_eq!(calculate_adx(&bars, 0), Err(IndicatorError::ZeroWindow));
    }

    #[test]
    fn adx_insufficient_data() {
        let bars = vec![bar(1.0, 2.0, 0.5, 1.5); 10];
        assert_eq!(
            calculate_adx(&bars, 14),
            Err(IndicatorError::InsufficientData {
                required: 29,
                available: 10
            })
        );
    }

    #[test]
    fn adx_strong_uptrend() {
        // Consecutive higher highs and higher lows.
        let bars: Vec<Bar> = (0..60)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                bar(base, base + 1.5, base - 0.5, base + 1.0)
            })
            .collect();

        let value = calculate_adx(&bars, 14).unwrap();
        assert!(value > 25.0, "expected ADX > 25 for strong trend, got {value}");
    }

    #[test]
    fn adx_flat_market_near_zero() {
        let bars = vec![bar(100.0, 101.0, 99.0, 100.0); 60];
        let value = calculate_adx(&bars, 14).unwrap();
        assert!(value < 1.0, "expected ADX near 0 for flat market, got {value}");
    }

    #[test]
    fn adx_result_range() {
        let bars: Vec<Bar> = (0..100)
            .map(|i| {
                let base = 50.0 + (i as f64 * 0.3).sin() * 10.0;
                bar(base - 0.5, base + 1.0, base - 1.0, base + 0.5)
            })
            .collect();
        let value = calculate_adx(&bars, 14).unwrap();
        assert!((0.0..=100.0).contains(&value), "ADX {value} out of range");
    }

    #[test]
    fn adx_minimum_bars_exact() {
        let window = 5;
        let min = 2 * window + 1;
        let bars: Vec<Bar> = (0..min)
            .map(|i| {
                let base = 100.0 + i as f64;
                bar(base, base + 1.0, base - 0.5, base + 0.5)
            })
            .collect();
        assert!(calculate_adx(&bars, window).is_ok());
        assert!(calculate_adx(&bars[..min - 1], window).is_err());
    }
}
