// Exponential Moving Average (EMA) indicator implementation
use super::accumulators::EmaAccumulator;
use super::{ensure_period, IndicatorCalculator, PriceField};
use crate::error::Result;
use serde_json::Value;
use shared::models::OhlcvRow;

pub struct Ema {
    name: String,
    period: usize,
    field: PriceField,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self::on_field(period, PriceField::Close)
    }

    pub fn on_field(period: usize, field: PriceField) -> Self {
        Self {
            name: format!("EMA({}, {})", period, field.as_str()),
            period,
            field,
        }
    }
}

impl IndicatorCalculator for Ema {
    type Output = Option<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "field": self.field.as_str() })
    }

    fn calculate(&self, data: &[OhlcvRow]) -> Result<Vec<Option<f64>>> {
        ensure_period(&self.name, self.period)?;

        let mut accumulator = EmaAccumulator::new(self.period);
        Ok(data
            .iter()
            .map(|row| accumulator.push(self.field.value(row)))
            .collect())
    }
}
