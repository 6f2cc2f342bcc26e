// Runs process_instrument over many instruments with a bounded number in flight
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{EngineSettings, IndicatorSettings};
use crate::data::InstrumentFile;
use crate::error::{EngineError, Result};

use super::process_instrument::process_instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedInstrument {
    pub symbol: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: Vec<String>,
    pub failed: Vec<FailedInstrument>,
    pub rows_written: usize,
}

async fn run_instrument(
    instrument: InstrumentFile,
    indicators: IndicatorSettings,
    permits: Arc<Semaphore>,
    cancelled: Arc<AtomicBool>,
) -> Result<usize> {
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|e| EngineError::TaskError(e.to_string()))?;
    // Aborting the task does not stop a running blocking job, so the job
    // checks `cancelled` itself before writing.
    tokio::task::spawn_blocking(move || process_instrument(&instrument, &indicators, &cancelled)).await?
}

pub async fn handle_process_directory(
    instruments: Vec<InstrumentFile>,
    settings: Arc<EngineSettings>,
) -> Result<ProcessSummary> {
    let permits = Arc::new(Semaphore::new(settings.workers));
    let cancelled = Arc::new(AtomicBool::new(false));
    let mut tasks = JoinSet::new();

    for instrument in instruments {
        let permits = permits.clone();
        let indicators = settings.indicators.clone();
        let cancelled = cancelled.clone();
        tasks.spawn(async move {
            let symbol = instrument.symbol.clone();
            (symbol, run_instrument(instrument, indicators, permits, cancelled).await)
        });
    }

    let mut summary = ProcessSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let (symbol, outcome) = joined?;
        match outcome {
            Ok(rows) => {
                tracing::info!(symbol = %symbol, rows, "Technical analysis completed");
                summary.rows_written += rows;
                summary.processed.push(symbol);
            }
            Err(e) if settings.abort_on_error => {
                tracing::error!(symbol = %symbol, error = %e, "Technical analysis failed, aborting run");
                cancelled.store(true, Ordering::SeqCst);
                tasks.abort_all();
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Technical analysis failed, skipping instrument");
                summary.failed.push(FailedInstrument { symbol, error: e.to_string() });
            }
        }
    }

    summary.processed.sort();
    summary.failed.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    Ok(summary)
}
