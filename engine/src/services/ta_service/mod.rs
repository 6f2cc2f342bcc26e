// engine/src/services/ta_service/mod.rs
// Pipeline driver: the TaService struct plus one submodule per operation.
use std::path::Path;
use std::sync::Arc;

use shared::models::{IndicatorRow, OhlcvRow};

use crate::config::EngineSettings;
use crate::data::discover_instruments;
use crate::error::Result;

pub mod calculate_ta;
pub mod process_directory;
pub mod process_instrument;

pub use process_directory::{FailedInstrument, ProcessSummary};

pub struct TaService {
    settings: Arc<EngineSettings>,
}

impl TaService {
    pub fn new(settings: EngineSettings) -> Result<Self> {
        settings.validate()?;
        Ok(TaService { settings: Arc::new(settings) })
    }

    /// Indicator rows for one in-memory series, aligned 1:1 with it.
    pub fn compute(&self, series: &[OhlcvRow]) -> Result<Vec<IndicatorRow>> {
        calculate_ta::calculate_ta(series, &self.settings.indicators)
    }

    /// Generates `<SYMBOL>_TA.csv` in `output_dir` for every `*.csv` in `input_dir`.
    pub async fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ProcessSummary> {
        std::fs::create_dir_all(output_dir)?;
        let instruments = discover_instruments(input_dir, output_dir)?;
        tracing::info!(
            input_dir = %input_dir.display(),
            output_dir = %output_dir.display(),
            instruments = instruments.len(),
            workers = self.settings.workers,
            "Generating technical analysis data"
        );

        let summary =
            process_directory::handle_process_directory(instruments, self.settings.clone()).await?;

        tracing::info!(
            processed = summary.processed.len(),
            failed = summary.failed.len(),
            rows = summary.rows_written,
            "Technical analysis run finished"
        );
        Ok(summary)
    }
}
