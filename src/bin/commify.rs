use anyhow::Result;
use clap::Parser;
use linetools::filters::commify::{Args, Mode};
use linetools::{input, logging, output};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing();
    output::exit_status(run(args))
}

fn run(args: Args) -> Result<()> {
    let commifier = args.commifier();
    let mut out = output::stdout();

    match args.mode() {
        Mode::Arguments(numbers) => commifier.format_arguments(&numbers, &mut out)?,
        Mode::Filter(files) => {
            if files.is_empty() && io::stdin().is_terminal() {
                eprintln!("Enter numbers");
            }
            commifier.filter(input::open(files), &mut out)?;
        }
    }
    out.close()
}
