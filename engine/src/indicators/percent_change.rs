// Day-over-day percent change of the close price
use super::IndicatorCalculator;
use crate::error::{EngineError, Result};
use serde_json::Value;
use shared::models::OhlcvRow;
use shared::utils::precision::round4;

/// Percent change of each close against the previous close. The first day
/// is measured against its own open.
#[derive(Default)]
pub struct PercentChange;

impl PercentChange {
    pub fn new() -> Self {
        Self
    }
}

impl IndicatorCalculator for PercentChange {
    type Output = f64;

    fn name(&self) -> &str {
        "P_CHANGE"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn calculate(&self, data: &[OhlcvRow]) -> Result<Vec<f64>> {
        let Some(first) = data.first() else {
            return Ok(Vec::new());
        };

        let mut reference = first.open;
        data.iter()
            .enumerate()
            .map(|(index, row)| {
                if reference == 0.0 {
                    return Err(EngineError::DivisionByZeroError { index, date: row.date });
                }
                let change = round4(100.0 * (row.close - reference) / reference);
                reference = row.close;
                Ok(change)
            })
            .collect()
    }
}
