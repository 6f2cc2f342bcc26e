// Engine library root
// Indicator computation over daily OHLCV series and the pipeline that runs it
// for every instrument of an exchange.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;

pub use error::EngineError;
pub use services::TaService;
