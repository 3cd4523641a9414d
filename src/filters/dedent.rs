//! Remove the indentation of pasted text, taking the width from the first line.

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::input::{for_each_line, split_terminator};
use crate::output::Writer;

#[derive(Parser, Debug)]
#[command(
    name = "remove-leading-whitespace",
    version,
    about = "Trim leading whitespace from every line, by the width found on the first line"
)]
pub struct Args {
    /// Input files, read in order (standard input if none)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c)
}

/// Number of leading whitespace characters in `content`.
pub fn indent_width(content: &[u8]) -> usize {
    content.iter().take_while(|&&b| is_blank(b)).count()
}

/// Drops up to `n` leading characters (bytes when `content` is not UTF-8).
pub fn strip_chars(content: &[u8], n: usize) -> &[u8] {
    if n == 0 {
        return content;
    }
    let cut = match std::str::from_utf8(content) {
        Ok(text) => text
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len()),
        Err(_) => n.min(content.len()),
    };
    &content[cut..]
}

/// Strips the first line's indentation width from every line, the first
/// included. Terminators are kept. Returns the width used.
pub fn dedent<R: BufRead, W: Write>(input: R, out: &mut Writer<W>) -> Result<usize> {
    let mut width = 0usize;
    for_each_line(input, |index, line| {
        let (content, terminator) = split_terminator(line);
        if index == 0 {
            width = indent_width(content);
        }
        out.write_parts(strip_chars(content, width), terminator)
    })?;
    Ok(width)
}
