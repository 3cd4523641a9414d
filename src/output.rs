use anyhow::{Context, Error, Result};
use std::io::{self, BufWriter, StdoutLock, Write};
use std::process::ExitCode;

/// Line sink the filters write to. Buffers, counts what it emits, and must
/// be finished to flush.
pub struct Writer<W: Write> {
    inner: BufWriter<W>,
    lines: usize,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            lines: 0,
        }
    }

    /// Writes `line` as-is; it carries its own terminator (or none).
    pub fn write_raw(&mut self, line: &[u8]) -> Result<()> {
        self.inner.write_all(line).context("writing output")?;
        self.lines += 1;
        Ok(())
    }

    /// Writes `head` then `tail` as one line.
    pub fn write_parts(&mut self, head: &[u8], tail: &[u8]) -> Result<()> {
        self.inner.write_all(head).context("writing output")?;
        self.inner.write_all(tail).context("writing output")?;
        self.lines += 1;
        Ok(())
    }

    /// Writes `content` followed by a single `\n`.
    pub fn write_line(&mut self, content: &[u8]) -> Result<()> {
        self.write_parts(content, b"\n")
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().context("flushing output")?;
        self.inner
            .into_inner()
            .map_err(|e| Error::new(e.into_error()).context("flushing output"))
    }

    /// Flushes and drops the underlying sink (releasing a stdout lock).
    pub fn close(self) -> Result<()> {
        self.finish().map(drop)
    }
}

pub fn stdout() -> Writer<StdoutLock<'static>> {
    Writer::new(io::stdout().lock())
}

/// True when `err` comes from writing into a pipe whose reader went away
/// (e.g. `datesplit log | head`).
pub fn is_broken_pipe(err: &Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
}

/// Turns the outcome of a binary's `run` into its exit status, printing the
/// error chain on failure. A closed downstream pipe counts as success.
pub fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
