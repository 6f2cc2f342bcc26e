// Relative Strength Index (RSI) indicator implementation
//
// Simple rolling RSI over intraday moves: each day contributes its
// close - open move to either the "up" or the "down" sum, and the sums cover
// the last `period` days. No Wilder smoothing.
use super::accumulators::SumWindow;
use super::{ensure_period, IndicatorCalculator};
use crate::error::Result;
use serde_json::Value;
use shared::models::OhlcvRow;
use shared::utils::precision::round4;

/// Below this the down sum is treated as zero and the RSI pinned at 100.
const MIN_DOWN_SUM: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiPoint {
    pub up: f64,
    pub down: f64,
    pub rsi: Option<f64>,
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }

    fn strength_index(sum_up: f64, sum_down: f64) -> f64 {
        if sum_down <= MIN_DOWN_SUM {
            return 100.0;
        }
        round4(100.0 - (100.0 / (1.0 + (sum_up / sum_down))))
    }
}

impl IndicatorCalculator for Rsi {
    type Output = RsiPoint;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[OhlcvRow]) -> Result<Vec<RsiPoint>> {
        ensure_period(&self.name, self.period)?;

        let mut ups = SumWindow::new(self.period);
        let mut downs = SumWindow::new(self.period);

        Ok(data
            .iter()
            .map(|row| {
                // Unchanged days count as a zero "down" move.
                let (up, down) = if row.open >= row.close {
                    (0.0, round4(row.open - row.close))
                } else {
                    (round4(row.close - row.open), 0.0)
                };

                let rsi = match (ups.push(up), downs.push(down)) {
                    (Some(sum_up), Some(sum_down)) => Some(Self::strength_index(sum_up, sum_down)),
                    _ => None,
                };

                RsiPoint { up, down, rsi }
            })
            .collect())
    }
}
