use thiserror::Error;

/// Bad command-line value. Surfaced to the user; the process exits non-zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid timestamp for --{flag}: {value:?}")]
    InvalidTimestamp { flag: &'static str, value: String },

    #[error("invalid number for --{flag}: {value:?}")]
    InvalidNumber { flag: &'static str, value: String },
}

/// Text that looked like a timestamp but did not parse. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampParseError {
    #[error("not valid utf-8")]
    Encoding,

    #[error("unrecognised timestamp: {0}")]
    Format(String),

    #[error("zone offset out of range: {0}")]
    Offset(String),

    #[error("unknown zone name: {0}")]
    Zone(String),
}
