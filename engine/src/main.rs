// Engine main entry point
use clap::Parser;
use engine::config::EngineSettings;
use engine::TaService;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ta-engine")]
#[command(about = "Generate technical analysis files from daily OHLCV series", long_about = None)]
struct Cli {
    /// Directory with one `<SYMBOL>.csv` per instrument
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Directory receiving the `<SYMBOL>_TA.csv` files
    #[arg(short, long)]
    output_dir: PathBuf,

    /// JSON settings file; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of instruments processed concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// Stop at the first instrument that fails
    #[arg(long)]
    abort_on_error: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_filter(settings: &EngineSettings, verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => settings.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => EngineSettings::load_from_file(path)?,
        None => EngineSettings::default(),
    };
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }
    settings.abort_on_error |= cli.abort_on_error;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&settings, cli.verbose))
        .init();

    info!(indicators = ?settings.indicators, "Starting technical analysis engine...");

    let service = TaService::new(settings)?;
    let summary = service.process_directory(&cli.input_dir, &cli.output_dir).await?;

    for failed in &summary.failed {
        warn!(symbol = %failed.symbol, error = %failed.error, "Instrument skipped");
    }
    info!(
        processed = summary.processed.len(),
        failed = summary.failed.len(),
        "Done"
    );
    Ok(())
}
