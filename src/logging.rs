use std::io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default verbosity when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr tracing subscriber. Use RUST_LOG to raise the level
/// (e.g. `RUST_LOG=linetools=debug`). Standard output is left to the filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}
