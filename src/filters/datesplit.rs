//! Re-format an initial ISO-8601 date field in each line for easier analysis.
//!
//! ```sh
//! echo "2017-02-01T10:42:17+0000 some msg" | datesplit
//! # 2017 02 01 10 42 17 +0000 some msg
//!
//! # ERROR breakdown by day and hour after a given time
//! grep ERROR app.log | datesplit --after 2017-01-02T15:00:00 | datamash -W -s -g 3,4 count 1
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::config::{DateSplitConfig, FilterWindow};
use crate::error::ConfigError;
use crate::input::for_each_line;
use crate::output::Writer;
use crate::timestamp::{Timestamp, find_leading, parse_bound};

#[derive(Parser, Debug)]
#[command(
    name = "datesplit",
    version,
    about = "Re-format an initial date field in a line for easier analysis"
)]
pub struct Args {
    /// Keep the date, e.g. fields 1-3
    #[arg(short, long)]
    pub date: bool,

    /// Field(s) to include, 1 is first, max 7 (weekday year month day hour minute second)
    #[arg(
        short,
        long,
        value_name = "F1,F2...",
        value_delimiter = ',',
        allow_negative_numbers = true,
        value_parser = parse_field
    )]
    pub fields: Vec<i64>,

    /// Only dates >= DATETIME
    #[arg(short, long, value_name = "DATETIME", value_parser = parse_after)]
    pub after: Option<Timestamp>,

    /// Only dates <= DATETIME
    #[arg(short, long, value_name = "DATETIME", value_parser = parse_before)]
    pub before: Option<Timestamp>,

    /// Skip to line COUNT in the input, 1 is first
    #[arg(short, long, value_name = "COUNT", value_parser = parse_skip)]
    pub skip: Option<u64>,

    /// Input files, read in order (standard input if none)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Args {
    pub fn into_parts(self) -> (DateSplitConfig, Vec<PathBuf>) {
        let mut config = DateSplitConfig {
            emit_date_only: self.date,
            after: self.after,
            before: self.before,
            ..Default::default()
        };
        config.push_fields(self.fields);
        if let Some(count) = self.skip {
            config.set_skip(count);
        }
        (config, self.files)
    }
}

fn parse_field(value: &str) -> Result<i64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        flag: "fields",
        value: value.to_string(),
    })
}

fn parse_skip(value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        flag: "skip",
        value: value.to_string(),
    })
}

fn parse_after(value: &str) -> Result<Timestamp, ConfigError> {
    parse_bound(value).map_err(|_| ConfigError::InvalidTimestamp {
        flag: "after",
        value: value.to_string(),
    })
}

fn parse_before(value: &str) -> Result<Timestamp, ConfigError> {
    parse_bound(value).map_err(|_| ConfigError::InvalidTimestamp {
        flag: "before",
        value: value.to_string(),
    })
}

/// Where a line falls relative to the configured skip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SkippingToStart,
    Active,
}

/// Line counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub read: usize,
    pub skipped: usize,
    pub rewritten: usize,
    pub suppressed: usize,
}

/// What happened to a single active line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// No parseable leading timestamp; emitted as-is.
    Passed(&'a [u8]),
    /// Timestamp rewritten into the configured layout.
    Rewritten(Vec<u8>),
    /// Timestamp outside the window; not emitted.
    Suppressed,
}

pub struct DateSplitter {
    window: FilterWindow,
    format: String,
    skip_count: Option<usize>,
}

impl DateSplitter {
    pub fn new(config: &DateSplitConfig) -> Self {
        Self {
            window: config.window(),
            format: config.layout().strftime(),
            skip_count: config.skip_count,
        }
    }

    pub fn phase(&self, index: usize) -> Phase {
        match self.skip_count {
            Some(skip) if index < skip => Phase::SkippingToStart,
            _ => Phase::Active,
        }
    }

    /// Applies filtering and re-formatting to one line. Malformed timestamps
    /// degrade to pass-through.
    pub fn process<'a>(&self, line: &'a [u8]) -> Outcome<'a> {
        let found = match find_leading(line) {
            Ok(Some(found)) => found,
            Ok(None) => return Outcome::Passed(line),
            Err(err) => {
                trace!(error = %err, "leading timestamp did not parse");
                return Outcome::Passed(line);
            }
        };
        if self.window.suppresses(&found.value) {
            return Outcome::Suppressed;
        }

        let formatted = found.value.format(&self.format).to_string();
        let rest = &line[found.len..];
        let mut rewritten = Vec::with_capacity(formatted.len() + rest.len());
        rewritten.extend_from_slice(formatted.as_bytes());
        rewritten.extend_from_slice(rest);
        Outcome::Rewritten(rewritten)
    }

    /// Streams `input` to `out`. The skip notice goes to `diag`.
    pub fn run<R, W, D>(&self, input: R, out: &mut Writer<W>, diag: &mut D) -> Result<Summary>
    where
        R: BufRead,
        W: Write,
        D: Write,
    {
        if let Some(skip) = self.skip_count {
            writeln!(diag, "skipping {skip} line(s)")?;
        }

        let mut summary = Summary::default();
        let read = for_each_line(input, |index, line| {
            if self.phase(index) == Phase::SkippingToStart {
                summary.skipped += 1;
                return Ok(());
            }
            match self.process(line) {
                Outcome::Passed(line) => out.write_raw(line),
                Outcome::Rewritten(line) => {
                    summary.rewritten += 1;
                    out.write_raw(&line)
                }
                Outcome::Suppressed => {
                    summary.suppressed += 1;
                    Ok(())
                }
            }
        })?;
        summary.read = read;

        debug!(
            read = summary.read,
            skipped = summary.skipped,
            rewritten = summary.rewritten,
            suppressed = summary.suppressed,
            "datesplit finished"
        );
        Ok(summary)
    }
}
