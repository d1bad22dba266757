// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators served
// by the API. Every public function returns `Result<T, IndicatorError>` so
// callers are forced to handle insufficient-data and degenerate-window
// scenarios; no function ever yields a partial, default, or non-finite value.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;

use thiserror::Error;

/// Why an indicator could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The series is shorter than the minimum the indicator needs.
    #[error("insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// A zero look-back window was requested.
    #[error("window must be greater than zero")]
    ZeroWindow,
}

/// Guard shared by every indicator: reject zero windows and series shorter
/// than `required`.
pub(crate) fn require(len: usize, required: usize, window: usize) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::ZeroWindow);
    }
    if len < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: len,
        });
    }
    Ok(())
}
