use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::not_available;

/// One trading day of an instrument, as assembled from the exchange bhavcopy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Technical-analysis values for one trading day.
///
/// Field order and the serialized names are the column layout of the
/// `<SYMBOL>_TA.csv` files. `None` means the indicator is still warming up
/// on that day and is written as `NA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    #[serde(rename = "UP")]
    pub up: f64,
    #[serde(rename = "DOWN")]
    pub down: f64,
    #[serde(rename = "RSI", with = "not_available")]
    pub rsi: Option<f64>,
    #[serde(rename = "EMA_50", with = "not_available")]
    pub ema_50: Option<f64>,
    #[serde(rename = "EMA_21", with = "not_available")]
    pub ema_21: Option<f64>,
    #[serde(rename = "EMA_9", with = "not_available")]
    pub ema_9: Option<f64>,
    #[serde(rename = "MACD", with = "not_available")]
    pub macd: Option<f64>,
    #[serde(rename = "MACD_SIG", with = "not_available")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "VOL_EMA", with = "not_available")]
    pub vol_ema_10: Option<f64>,
    #[serde(rename = "P_CHANGE", with = "not_available")]
    pub percent_change: Option<f64>,
}

impl IndicatorRow {
    /// Column names in output order.
    pub const CSV_HEADER: [&'static str; 11] = [
        "date", "UP", "DOWN", "RSI", "EMA_50", "EMA_21", "EMA_9", "MACD", "MACD_SIG", "VOL_EMA",
        "P_CHANGE",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> IndicatorRow {
        IndicatorRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            up: 1.5,
            down: 0.0,
            rsi: Some(62.5),
            ema_50: None,
            ema_21: None,
            ema_9: Some(101.25),
            macd: None,
            macd_signal: None,
            vol_ema_10: Some(1200.0),
            percent_change: Some(-0.75),
        }
    }

    #[test]
    fn test_indicator_row_csv_layout() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(sample_row()).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = output.lines();

        assert_eq!(lines.next().unwrap(), IndicatorRow::CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-01,1.5,0.0,62.5,NA,NA,101.25,NA,NA,1200.0,-0.75"
        );
    }

    #[test]
    fn test_indicator_row_csv_read_back() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(sample_row()).unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<IndicatorRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows, vec![sample_row()]);
    }

    #[test]
    fn test_ohlcv_row_json() {
        let row = OhlcvRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 100.0,
            high: 102.5,
            low: 99.0,
            close: 101.0,
            volume: 15000,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"date\":\"2024-03-01\""));
        let back: OhlcvRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
