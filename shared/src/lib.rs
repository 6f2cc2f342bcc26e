//! Data model shared by the TA engine and the consumers of its output files.

pub mod models;
pub mod utils;

pub use models::{IndicatorRow, OhlcvRow};
