use anyhow::Result;
use clap::Parser;
use linetools::filters::datesplit::{Args, DateSplitter};
use linetools::{input, logging, output};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing();
    output::exit_status(run(args))
}

fn run(args: Args) -> Result<()> {
    let (config, files) = args.into_parts();
    let splitter = DateSplitter::new(&config);

    let mut out = output::stdout();
    splitter.run(input::open(files), &mut out, &mut io::stderr())?;
    out.close()
}
