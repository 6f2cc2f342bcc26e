// Per-instrument input files and where their TA output goes
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Suffix appended to the symbol for the TA output file.
pub const TA_FILE_SUFFIX: &str = "_TA.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentFile {
    pub symbol: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl InstrumentFile {
    pub fn new(source: PathBuf, output_dir: &Path) -> Option<Self> {
        let symbol = source.file_stem()?.to_str()?.to_string();
        let destination = output_dir.join(format!("{}{}", symbol, TA_FILE_SUFFIX));
        Some(Self { symbol, source, destination })
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}

/// Lists the `*.csv` files directly inside `input_dir`, sorted by symbol.
pub fn discover_instruments(input_dir: &Path, output_dir: &Path) -> Result<Vec<InstrumentFile>> {
    let mut instruments = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_csv(&path) {
            continue;
        }
        match InstrumentFile::new(path, output_dir) {
            Some(instrument) => instruments.push(instrument),
            None => tracing::warn!(input_dir = %input_dir.display(), "Skipping file with a non UTF-8 name"),
        }
    }
    instruments.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    Ok(instruments)
}
