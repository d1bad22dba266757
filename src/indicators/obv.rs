// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// A running signed cumulative volume sum:
//
//   OBV_0 = 0
//   OBV_t = OBV_{t-1} + volume_t   if close_t > close_{t-1}
//           OBV_{t-1} - volume_t   if close_t < close_{t-1}
//           OBV_{t-1}              otherwise
//
// The first bar contributes nothing (there is no previous close to compare
// against). Defined for any non-empty series.
// =============================================================================

use super::IndicatorError;
use crate::types::Bar;

/// Compute the final OBV value over `bars` (oldest first).
///
/// # Errors
/// - `InsufficientData` for an empty series.
pub fn calculate_obv(bars: &[Bar]) -> Result<i64, IndicatorError> {
    if bars.is_empty() {
        return Err(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        });
    }

    let mut obv: i64 = 0;
    for pair in bars.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if cur.close > prev.close {
            obv += cur.volume as i64;
        } else if cur.close < prev.close {
            obv -= cur.volume as i64;
        }
    }

    Ok(obv)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, volume: u64) -> Bar {
        Bar {
            date: "2024-01-02".to_string(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn obv_empty_series() {
        assert_eq!(
            calculate_obv(&[]),
            Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn obv_single_bar_is_zero() {
        assert_eq!(calculate_obv(&[bar(100.0, 5000)]).unwrap(), 0);
    }

    #[test]
    fn obv_mixed_moves() {
        // up +200, down -300, unchanged 0, up +150
        let bars = vec![
            bar(10.0, 100),
            bar(11.0, 200),
            bar(10.5, 300),
            bar(10.5, 400),
            bar(12.0, 150),
        ];
        assert_eq!(calculate_obv(&bars).unwrap(), 200 - 300 + 150);
    }

    #[test]
    fn obv_is_running_cumulative() {
        // OBV(series[0..n]) == OBV(series[0..n-1]) + signed_volume(bar[n]).
        let bars = vec![
            bar(10.0, 100),
            bar(11.0, 200),
            bar(10.5, 300),
            bar(12.0, 400),
            bar(11.0, 500),
            bar(11.0, 600),
        ];
        for n in 2..=bars.len() {
            let full = calculate_obv(&bars[..n]).unwrap();
            let prefix = calculate_obv(&bars[..n - 1]).unwrap();
            let (prev, cur) = (&bars[n - 2], &bars[n - 1]);
            let signed = if cur.close > prev.close {
                cur.volume as i64
            } else if cur.close < prev.close {
                -(cur.volume as i64)
            } else {
                0
            };
            assert_eq!(full, prefix + signed);
        }
    }
}
