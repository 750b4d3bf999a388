use thiserror::Error;

/// Validation and contract errors exposed by `pegscan-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must not contain whitespace (index {index})")]
    TickerWhitespace { index: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("list name cannot be empty")]
    EmptyListName,
    #[error("no saved list named '{name}'")]
    UnknownList { name: String },

    #[error("unsupported export file '{path}', expected a .csv, .tsv, .tab or .xlsx extension")]
    UnsupportedExport { path: String },

    #[error("invalid value '{value}' for configuration key {key}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("politeness delay min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },
}

/// Top-level error type for core operations that touch the filesystem.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
