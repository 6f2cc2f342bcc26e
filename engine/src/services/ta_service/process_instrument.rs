// Load -> compute -> write for a single instrument file
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::IndicatorSettings;
use crate::data::{InstrumentFile, OhlcvCsvParser};
use crate::error::{EngineError, Result};

use super::calculate_ta::calculate_ta;

/// Returns the number of TA rows written. Nothing is written once `cancelled`
/// is set, even if the computation already finished.
pub fn process_instrument(
    instrument: &InstrumentFile,
    settings: &IndicatorSettings,
    cancelled: &AtomicBool,
) -> Result<usize> {
    tracing::debug!(
        symbol = %instrument.symbol,
        source = %instrument.source.display(),
        "Generating technical analysis data"
    );

    let series = OhlcvCsvParser::load_series(&instrument.source)?;
    let rows = calculate_ta(&series, settings)?;
    if cancelled.load(Ordering::SeqCst) {
        return Err(EngineError::TaskError(format!("{} cancelled before writing", instrument.symbol)));
    }
    OhlcvCsvParser::write_indicator_rows(&instrument.destination, &rows)?;

    tracing::debug!(
        symbol = %instrument.symbol,
        destination = %instrument.destination.display(),
        rows = rows.len(),
        "Technical analysis data written"
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sbin(dir: &std::path::Path) -> std::path::PathBuf {
        let source = dir.join("SBIN.csv");
        fs::write(
            &source,
            "2024-01-01,100,101,99,100,1000\n2024-01-02,100,111,99,110,1200\n2024-01-03,110,112,98,99,900\n",
        )
        .unwrap();
        source
    }

    #[test]
    fn test_process_instrument_writes_ta_file() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let source = write_sbin(input.path());

        let instrument = InstrumentFile::new(source, output.path()).unwrap();
        let rows =
            process_instrument(&instrument, &IndicatorSettings::default(), &AtomicBool::new(false)).unwrap();
        assert_eq!(rows, 3);

        let written = fs::read_to_string(output.path().join("SBIN_TA.csv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2024-01-01,0.0,0.0,NA,NA,NA,NA,NA,NA,NA,0.0");
        assert_eq!(lines[2], "2024-01-02,10.0,0.0,NA,NA,NA,NA,NA,NA,NA,10.0");
        assert_eq!(lines[3], "2024-01-03,0.0,11.0,NA,NA,NA,NA,NA,NA,NA,-10.0");
    }

    #[test]
    fn test_process_instrument_empty_file_is_invalid_input() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let source = input.path().join("EMPTY.csv");
        fs::write(&source, "").unwrap();

        let instrument = InstrumentFile::new(source, output.path()).unwrap();
        let result = process_instrument(&instrument, &IndicatorSettings::default(), &AtomicBool::new(false));
        assert!(matches!(result, Err(EngineError::InvalidInputError(_))));
        assert!(!instrument.destination.exists());
    }

    #[test]
    fn test_process_instrument_cancelled_does_not_write() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let instrument = InstrumentFile::new(write_sbin(input.path()), output.path()).unwrap();

        let result = process_instrument(&instrument, &IndicatorSettings::default(), &AtomicBool::new(true));
        match result {
            Err(EngineError::TaskError(msg)) => assert!(msg.contains("SBIN cancelled")),
            other => panic!("expected TaskError, got {:?}", other),
        }
        assert!(!instrument.destination.exists());
    }
}
