// Aligns the per-indicator columns into one IndicatorRow per trading day.
use super::{MacdPoint, RsiPoint};
use crate::error::{EngineError, Result};
use shared::models::{IndicatorRow, OhlcvRow};

/// Output of every calculator run over the same series, position by position.
#[derive(Debug, Clone, Default)]
pub struct IndicatorColumns {
    pub rsi: Vec<RsiPoint>,
    pub ema_long: Vec<Option<f64>>,
    pub ema_medium: Vec<Option<f64>>,
    pub ema_short: Vec<Option<f64>>,
    pub macd: Vec<MacdPoint>,
    pub volume_ema: Vec<Option<f64>>,
    pub percent_change: Vec<f64>,
}

impl IndicatorColumns {
    fn check_len(name: &str, len: usize, expected: usize) -> Result<()> {
        if len != expected {
            return Err(EngineError::IndicatorError(format!(
                "{} column has {} values, series has {} rows",
                name, len, expected
            )));
        }
        Ok(())
    }

    /// Builds the output rows. Percent change is defined on every day, so it
    /// drives the merge; the other columns contribute their value or `None`
    /// at the same position without any back-filling.
    pub fn merge(&self, series: &[OhlcvRow]) -> Result<Vec<IndicatorRow>> {
        let rows = series.len();
        Self::check_len("P_CHANGE", self.percent_change.len(), rows)?;
        Self::check_len("RSI", self.rsi.len(), rows)?;
        Self::check_len("EMA_50", self.ema_long.len(), rows)?;
        Self::check_len("EMA_21", self.ema_medium.len(), rows)?;
        Self::check_len("EMA_9", self.ema_short.len(), rows)?;
        Self::check_len("MACD", self.macd.len(), rows)?;
        Self::check_len("VOL_EMA", self.volume_ema.len(), rows)?;

        Ok(self
            .percent_change
            .iter()
            .enumerate()
            .map(|(i, change)| IndicatorRow {
                date: series[i].date,
                up: self.rsi[i].up,
                down: self.rsi[i].down,
                rsi: self.rsi[i].rsi,
                ema_50: self.ema_long[i],
                ema_21: self.ema_medium[i],
                ema_9: self.ema_short[i],
                macd: self.macd[i].macd,
                macd_signal: self.macd[i].signal,
                vol_ema_10: self.volume_ema[i],
                percent_change: Some(*change),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{closes, day};

    fn columns(len: usize) -> IndicatorColumns {
        IndicatorColumns {
            rsi: vec![RsiPoint { up: 0.0, down: 0.0, rsi: None }; len],
            ema_long: vec![None; len],
            ema_medium: vec![None; len],
            ema_short: vec![None; len],
            macd: vec![MacdPoint { macd: None, signal: None }; len],
            volume_ema: vec![None; len],
            percent_change: vec![0.0; len],
        }
    }

    #[test]
    fn test_merge_copies_each_column_in_place() {
        let series = closes(&[1.0, 2.0, 3.0]);
        let mut cols = columns(3);
        cols.ema_short[1] = Some(1.5);
        cols.macd[2] = MacdPoint { macd: Some(0.25), signal: None };
        cols.rsi[2] = RsiPoint { up: 1.0, down: 0.0, rsi: Some(100.0) };
        cols.percent_change = vec![0.0, 100.0, 50.0];

        let rows = cols.merge(&series).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.date).collect::<Vec<_>>(), vec![day(0), day(1), day(2)]);

        assert_eq!(rows[0].ema_9, None);
        assert_eq!(rows[1].ema_9, Some(1.5));
        // A value in one column never fills a gap in another.
        assert_eq!(rows[2].ema_9, None);
        assert_eq!(rows[2].macd, Some(0.25));
        assert_eq!(rows[2].macd_signal, None);
        assert_eq!(rows[2].rsi, Some(100.0));
        assert_eq!(rows[2].up, 1.0);
        assert_eq!(rows[1].percent_change, Some(100.0));
    }

    #[test]
    fn test_merge_rejects_misaligned_column() {
        let series = closes(&[1.0, 2.0, 3.0]);
        let mut cols = columns(3);
        cols.volume_ema.pop();

        match cols.merge(&series) {
            Err(EngineError::IndicatorError(msg)) => assert!(msg.contains("VOL_EMA")),
            other => panic!("expected IndicatorError, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_empty() {
        assert!(columns(0).merge(&[]).unwrap().is_empty());
    }
}
