use anyhow::Result;
use clap::Parser;
use linetools::filters::dedent::{Args, dedent};
use linetools::{input, logging, output};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing();
    output::exit_status(run(args))
}

fn run(args: Args) -> Result<()> {
    let mut out = output::stdout();
    let width = dedent(input::open(args.files), &mut out)?;
    debug!(width, lines = out.lines_written(), "dedent finished");
    out.close()
}
