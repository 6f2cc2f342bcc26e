// Reading OHLCV series and writing TA files
pub mod csv_parser;
pub mod instruments;

pub use csv_parser::OhlcvCsvParser;
pub use instruments::{discover_instruments, InstrumentFile};
