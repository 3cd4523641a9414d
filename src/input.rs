use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use tracing::debug;

/// Operand meaning "read standard input here".
pub const STDIN_OPERAND: &str = "-";

/// The FILE operands of a command read back to back as one stream.
/// Files are opened lazily, so earlier files are fully processed before a
/// missing later one is reported.
pub struct Inputs {
    pending: VecDeque<PathBuf>,
    current: Option<Box<dyn Read>>,
}

impl Inputs {
    /// No operands means standard input.
    pub fn new<I, P>(operands: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut pending: VecDeque<PathBuf> = operands.into_iter().map(Into::into).collect();
        if pending.is_empty() {
            pending.push_back(PathBuf::from(STDIN_OPERAND));
        }
        Self {
            pending,
            current: None,
        }
    }

    fn open_next(&mut self) -> io::Result<bool> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(false);
        };
        let name = path.display().to_string();
        let reader: Box<dyn Read> = if path.as_os_str() == STDIN_OPERAND {
            Box::new(io::stdin())
        } else {
            let file = File::open(&path)
                .map_err(|e| io::Error::new(e.kind(), format!("{name}: {e}")))?;
            Box::new(file)
        };
        debug!(input = %name, "opened input");
        self.current = Some(reader);
        Ok(true)
    }
}

impl Read for Inputs {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.current.is_none() && !self.open_next()? {
                return Ok(0);
            }
            if let Some(reader) = self.current.as_mut() {
                let n = reader.read(buf)?;
                if n > 0 {
                    return Ok(n);
                }
            }
            self.current = None;
        }
    }
}

/// Calls `f` with each line of `reader`, terminator included. The last line
/// may lack a terminator. Returns the number of lines seen.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(usize, &[u8]) -> Result<()>,
{
    let mut buf = Vec::with_capacity(256);
    let mut index = 0usize;
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).context("reading input")?;
        if n == 0 {
            break;
        }
        f(index, &buf)?;
        index += 1;
    }
    Ok(index)
}

/// Buffered reader over `operands` (standard input when empty).
pub fn open<I, P>(operands: I) -> BufReader<Inputs>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    BufReader::new(Inputs::new(operands))
}

/// Splits a raw line into its content and its terminator (`\n`, `\r\n` or
/// nothing).
pub fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let cut = if line.ends_with(b"\r\n") {
        line.len() - 2
    } else if line.ends_with(b"\n") {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(cut)
}
