// Moving Average Convergence Divergence (MACD) with its signal line
use super::accumulators::LaggedDifference;
use super::ema::Ema;
use super::{ensure_period, IndicatorCalculator};
use crate::error::{EngineError, Result};
use serde_json::Value;
use shared::models::OhlcvRow;
use shared::utils::precision::round4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
}

pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    /// `fast` and `slow` are swapped when given in the wrong order, so
    /// `Macd::new(26, 12, 9)` and `Macd::new(12, 26, 9)` are the same indicator.
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        let (fast, slow) = if fast > slow { (slow, fast) } else { (fast, slow) };
        Self {
            name: format!("MACD({}, {}, {})", slow, fast, signal),
            fast,
            slow,
            signal,
        }
    }

    /// Simple moving average of the MACD line over `signal` days.
    ///
    /// The first `signal` MACD values fill the window sum; afterwards the sum
    /// is rolled forward by the difference between the newest value and the
    /// one `signal` positions back.
    fn signal_line(&self, macd: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut sum = 0.0;
        let mut filled = 0;
        let mut rolling = LaggedDifference::new(self.signal);

        macd.iter()
            .map(|value| {
                let value = (*value)?;
                let delta = rolling.push(value);
                if filled < self.signal {
                    sum += value;
                    filled += 1;
                    if filled < self.signal {
                        return None;
                    }
                } else {
                    sum += delta?;
                }
                Some(round4(sum / self.signal as f64))
            })
            .collect()
    }
}

impl IndicatorCalculator for Macd {
    type Output = MacdPoint;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, data: &[OhlcvRow]) -> Result<Vec<MacdPoint>> {
        ensure_period(&self.name, self.fast)?;
        ensure_period(&self.name, self.slow)?;
        ensure_period(&self.name, self.signal)?;

        let fast = Ema::new(self.fast).calculate(data)?;
        let slow = Ema::new(self.slow).calculate(data)?;
        if fast.len() != slow.len() {
            return Err(EngineError::IndicatorError(format!(
                "{}: EMA lengths differ ({} vs {})",
                self.name,
                fast.len(),
                slow.len()
            )));
        }

        // The slow EMA is the last to become available, so it bounds the MACD.
        let macd: Vec<Option<f64>> = fast
            .iter()
            .zip(slow.iter())
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => Some(round4(f - s)),
                _ => None,
            })
            .collect();
        let signal = self.signal_line(&macd);

        Ok(macd
            .into_iter()
            .zip(signal)
            .map(|(macd, signal)| MacdPoint { macd, signal })
            .collect())
    }
}
