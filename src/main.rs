use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use dsdb::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match dsdb::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Log to stderr, filtered by `DSDB_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "dsdb=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("DSDB_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}
