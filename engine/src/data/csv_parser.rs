use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use shared::models::{IndicatorRow, OhlcvRow};
use shared::utils::precision::round4;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{EngineError, Result};

// Field parsing for the per-instrument files assembled from the exchange bhavcopies.
pub mod bhav_format {
    use super::*;
    use std::str::FromStr;

    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse date '{}': {}", s, e)))
    }

    // Prices are kept to 4 fractional digits, like every computed value.
    pub fn parse_price(s: &str) -> Result<f64> {
        let value = f64::from_str(s.trim())
            .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse price '{}': {}", s, e)))?;
        if !value.is_finite() {
            return Err(EngineError::CsvDataFormatError(format!("Price '{}' is not finite", s)));
        }
        Ok(round4(value))
    }

    pub fn parse_volume(s: &str) -> Result<u64> {
        u64::from_str(s.trim())
            .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse volume '{}': {}", s, e)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_date_valid() {
            assert_eq!(parse_date("2024-12-30").unwrap(), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        }

        #[test]
        fn test_parse_date_invalid() {
            assert!(parse_date("30/12/2024").is_err());
            assert!(parse_date("2024-02-30").is_err());
        }

        #[test]
        fn test_parse_price_rounds() {
            assert_eq!(parse_price(" 123.456789 ").unwrap(), 123.4568);
            assert_eq!(parse_price("1500").unwrap(), 1500.0);
        }

        #[test]
        fn test_parse_price_rejects_garbage() {
            assert!(parse_price("12,5").is_err());
            assert!(parse_price("NaN").is_err());
        }

        #[test]
        fn test_parse_volume() {
            assert_eq!(parse_volume("24228").unwrap(), 24228);
            assert!(parse_volume("-5").is_err());
            assert!(parse_volume("12.5").is_err());
        }
    }
}

pub struct OhlcvCsvParser;

impl OhlcvCsvParser {
    // Headerless rows: date,open,high,low,close,volume
    // Example Row: 2024-12-30,1245.50,1260.00,1240.10,1255.35,183204
    pub fn load_series(file_path: &Path) -> Result<Vec<OhlcvRow>> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(Self::parse_record(&record, idx + 1)?);
        }
        Ok(rows)
    }

    fn parse_record(record: &StringRecord, line: usize) -> Result<OhlcvRow> {
        if record.len() < 6 {
            return Err(EngineError::CsvDataFormatError(format!(
                "Expected 6 fields at line {}, found {}",
                line,
                record.len()
            )));
        }

        let with_line = |name: &str, e: EngineError| {
            EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e))
        };

        Ok(OhlcvRow {
            date: bhav_format::parse_date(&record[0]).map_err(|e| with_line("date", e))?,
            open: bhav_format::parse_price(&record[1]).map_err(|e| with_line("open", e))?,
            high: bhav_format::parse_price(&record[2]).map_err(|e| with_line("high", e))?,
            low: bhav_format::parse_price(&record[3]).map_err(|e| with_line("low", e))?,
            close: bhav_format::parse_price(&record[4]).map_err(|e| with_line("close", e))?,
            volume: bhav_format::parse_volume(&record[5]).map_err(|e| with_line("volume", e))?,
        })
    }

    /// Writes the TA file with its header row; `None` values are written as `NA`.
    pub fn write_indicator_rows(file_path: &Path, rows: &[IndicatorRow]) -> Result<()> {
        let file = File::create(file_path)?;
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        // Written explicitly so an empty series still gets a header.
        wtr.write_record(IndicatorRow::CSV_HEADER)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
