// Runs every calculator over one series and merges the results.
use shared::models::{IndicatorRow, OhlcvRow};

use crate::config::IndicatorSettings;
use crate::error::{EngineError, Result};
use crate::indicators::{
    Ema, IndicatorCalculator, IndicatorColumns, Macd, PercentChange, PriceField, Rsi,
};

/// Rejects series the engine must not silently fix: empty, or dates that
/// are not strictly increasing.
pub fn validate_series(series: &[OhlcvRow]) -> Result<()> {
    if series.is_empty() {
        return Err(EngineError::InvalidInputError("OHLCV series is empty".to_string()));
    }
    for (i, pair) in series.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.date == previous.date {
            return Err(EngineError::InvalidInputError(format!(
                "duplicate date {} at rows {} and {}",
                current.date,
                i,
                i + 1
            )));
        }
        if current.date < previous.date {
            return Err(EngineError::InvalidInputError(format!(
                "date {} at row {} comes before {} at row {}",
                current.date,
                i + 1,
                previous.date,
                i
            )));
        }
    }
    Ok(())
}

fn run<C: IndicatorCalculator>(calculator: &C, series: &[OhlcvRow]) -> Result<Vec<C::Output>> {
    tracing::debug!(
        indicator = calculator.name(),
        parameters = %calculator.parameters(),
        rows = series.len(),
        "Calculating indicator"
    );
    calculator.calculate(series)
}

/// Computes the full TA table for one instrument. The calculators are
/// independent of each other and only share the input slice.
pub fn calculate_ta(series: &[OhlcvRow], settings: &IndicatorSettings) -> Result<Vec<IndicatorRow>> {
    settings.validate()?;
    validate_series(series)?;

    let columns = IndicatorColumns {
        rsi: run(&Rsi::new(settings.rsi_period), series)?,
        ema_long: run(&Ema::new(settings.ema_long), series)?,
        ema_medium: run(&Ema::new(settings.ema_medium), series)?,
        ema_short: run(&Ema::new(settings.ema_short), series)?,
        macd: run(&Macd::new(settings.macd_fast, settings.macd_slow, settings.macd_signal), series)?,
        volume_ema: run(&Ema::on_field(settings.volume_ema_period, PriceField::Volume), series)?,
        percent_change: run(&PercentChange::new(), series)?,
    };

    columns.merge(series)
}
