use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::input::for_each_line;
use crate::output::Writer;

#[derive(Parser, Debug)]
#[command(name = "trim", version, about = "Strip whitespace from each line")]
pub struct Args {
    /// Right trim only
    #[arg(short = 'r', long = "rtrim", visible_alias = "rstrip", overrides_with = "ltrim")]
    pub rtrim: bool,

    /// Left trim only
    #[arg(short = 'l', long = "ltrim", visible_alias = "lstrip", overrides_with = "rtrim")]
    pub ltrim: bool,

    /// Input files, read in order (standard input if none)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Args {
    pub fn mode(&self) -> TrimMode {
        if self.rtrim {
            TrimMode::Trailing
        } else if self.ltrim {
            TrimMode::Leading
        } else {
            TrimMode::Both
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrimMode {
    #[default]
    Both,
    Trailing,
    Leading,
}

fn is_space(b: u8) -> bool {
    matches!(b, 0 | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | b' ')
}

impl TrimMode {
    pub fn apply(self, line: &[u8]) -> &[u8] {
        let start = match self {
            TrimMode::Both | TrimMode::Leading => line
                .iter()
                .position(|&b| !is_space(b))
                .unwrap_or(line.len()),
            TrimMode::Trailing => 0,
        };
        let end = match self {
            TrimMode::Both | TrimMode::Trailing => line
                .iter()
                .rposition(|&b| !is_space(b))
                .map_or(start, |i| i + 1),
            TrimMode::Leading => line.len(),
        };
        &line[start..end.max(start)]
    }
}

/// Trims every line and terminates it with exactly one newline unless the
/// trimmed text already ends in one (left trim keeps the terminator).
pub fn trim<R: BufRead, W: Write>(input: R, mode: TrimMode, out: &mut Writer<W>) -> Result<usize> {
    for_each_line(input, |_, line| {
        let trimmed = mode.apply(line);
        if trimmed.ends_with(b"\n") {
            out.write_raw(trimmed)
        } else {
            out.write_line(trimmed)
        }
    })
}
