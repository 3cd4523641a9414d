//! Group the digits of numbers with a separator, e.g. `du -k . | sort -nr | commify`
//! or `commify 132461363141346432 6643145 1234`.

use anyhow::Result;
use clap::Parser;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::input::{for_each_line, split_terminator};
use crate::output::Writer;

/// Integer part with an optional fraction. The fraction is never grouped.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\d+(?:\.\d+)?").expect("number pattern compiles"));

const DEFAULT_SEPARATOR: &str = ",";

#[derive(Parser, Debug)]
#[command(name = "commify", version, about = "Format numbers with commas")]
pub struct Args {
    /// Run as filter: treat arguments as files even if they look like numbers
    #[arg(short, long)]
    pub filter: bool,

    /// Commify every number on a line, not just the first
    #[arg(short, long)]
    pub all: bool,

    /// Group separator
    #[arg(short, long, value_name = "SEP", default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Numbers to format, or files to filter (standard input if none)
    #[arg(value_name = "NUMBER|FILE")]
    pub operands: Vec<String>,
}

/// How the operands are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Every operand is a number; print each one grouped.
    Arguments(Vec<String>),
    /// Operands are files (or nothing, meaning standard input).
    Filter(Vec<PathBuf>),
}

impl Args {
    /// Only-numeric operands are formatted directly. Anything else, `--filter`
    /// or no operands at all switches to filter mode.
    pub fn mode(&self) -> Mode {
        if !self.filter && !self.operands.is_empty() && self.operands.iter().all(|o| is_number(o))
        {
            Mode::Arguments(self.operands.clone())
        } else {
            Mode::Filter(self.operands.iter().map(PathBuf::from).collect())
        }
    }

    pub fn commifier(&self) -> Commifier {
        Commifier::new(&self.separator, self.all)
    }
}

pub fn is_number(text: &str) -> bool {
    NUMBER
        .find(text.as_bytes())
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Inserts `separator` every three digits counting from the right.
pub fn group_digits(digits: &[u8], separator: &[u8]) -> Vec<u8> {
    let len = digits.len();
    let mut out = Vec::with_capacity(len + len / 3 * separator.len());
    for (i, &d) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.extend_from_slice(separator);
        }
        out.push(d);
    }
    out
}

/// Groups the integer part of `number`; anything from the first `.` on is
/// copied untouched.
pub fn commify(number: &[u8], separator: &[u8]) -> Vec<u8> {
    let int_len = number
        .iter()
        .position(|&b| b == b'.')
        .unwrap_or(number.len());
    let (int_part, rest) = number.split_at(int_len);
    let mut out = group_digits(int_part, separator);
    out.extend_from_slice(rest);
    out
}

pub struct Commifier {
    separator: Vec<u8>,
    all: bool,
}

impl Commifier {
    pub fn new(separator: &str, all: bool) -> Self {
        Self {
            separator: separator.as_bytes().to_vec(),
            all,
        }
    }

    /// Commifies the first number in `line`, or every number when `all`.
    pub fn line<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        let limit = if self.all { 0 } else { 1 };
        NUMBER.replacen(line, limit, |caps: &regex::bytes::Captures| {
            commify(&caps[0], &self.separator)
        })
    }

    pub fn format_arguments<W: Write>(&self, numbers: &[String], out: &mut Writer<W>) -> Result<()> {
        for number in numbers {
            out.write_line(&commify(number.as_bytes(), &self.separator))?;
        }
        Ok(())
    }

    pub fn filter<R: BufRead, W: Write>(&self, input: R, out: &mut Writer<W>) -> Result<usize> {
        for_each_line(input, |_, line| {
            let (content, terminator) = split_terminator(line);
            out.write_parts(&self.line(content), terminator)
        })
    }
}
