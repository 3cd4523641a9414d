//! Line-oriented text filters.
//!
//! Each filter reads standard input or the concatenation of its FILE operands
//! one line at a time and writes to standard output:
//!
//! - [`filters::datesplit`] re-formats a leading ISO-8601 timestamp into
//!   space-separated fields, optionally keeping only lines in a time range.
//! - [`filters::commify`] groups the digits of numbers.
//! - [`filters::dedent`] removes the indentation found on the first line.
//! - [`filters::trim`] strips whitespace from line ends.

pub mod config;
pub mod error;
pub mod filters;
pub mod input;
pub mod logging;
pub mod output;
pub mod timestamp;

pub use config::{DateSplitConfig, Field, FieldLayout, FilterWindow};
pub use error::{ConfigError, TimestampParseError};
pub use filters::datesplit::DateSplitter;
