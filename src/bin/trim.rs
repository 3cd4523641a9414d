use anyhow::Result;
use clap::Parser;
use linetools::filters::trim::{Args, trim};
use linetools::{input, logging, output};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing();
    output::exit_status(run(args))
}

fn run(args: Args) -> Result<()> {
    let mode = args.mode();
    let mut out = output::stdout();
    trim(input::open(args.files), mode, &mut out)?;
    out.close()
}
