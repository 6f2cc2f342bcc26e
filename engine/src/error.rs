use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The OHLCV series breaks its contract (empty, unordered or duplicate dates).
    #[error("Invalid input: {0}")]
    InvalidInputError(String),

    /// A percent-change reference price of zero.
    #[error("Division by zero: reference price is 0 at row {index} ({date})")]
    DivisionByZeroError { index: usize, date: NaiveDate },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    #[error("Worker task failed: {0}")]
    TaskError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        EngineError::TaskError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
