// Engine configuration: indicator periods, worker pool size and logging.
pub mod settings;

pub use settings::{EngineSettings, IndicatorSettings};
