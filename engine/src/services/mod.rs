// Services built on top of the indicator engine
pub mod ta_service;

pub use ta_service::{FailedInstrument, ProcessSummary, TaService};
