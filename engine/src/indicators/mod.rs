// Technical indicators module
pub mod accumulators;
pub mod ema;
pub mod macd;
pub mod merge;
pub mod percent_change;
pub mod rsi;

pub use ema::Ema;
pub use macd::{Macd, MacdPoint};
pub use merge::IndicatorColumns;
pub use percent_change::PercentChange;
pub use rsi::{Rsi, RsiPoint};

use serde_json::Value;
use shared::models::OhlcvRow;

use crate::error::{EngineError, Result};

// Common trait for all indicators. `calculate` returns exactly one output per
// input row; warm-up positions carry `None` inside `Output`.
pub trait IndicatorCalculator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[OhlcvRow]) -> Result<Vec<Self::Output>>;
}

/// Column of the OHLCV row an indicator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Close,
    Volume,
}

impl PriceField {
    pub fn value(self, row: &OhlcvRow) -> f64 {
        match self {
            PriceField::Close => row.close,
            PriceField::Volume => row.volume as f64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceField::Close => "close",
            PriceField::Volume => "volume",
        }
    }
}

pub(crate) fn ensure_period(name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(EngineError::IndicatorError(format!("{} period cannot be 0", name)));
    }
    Ok(())
}
