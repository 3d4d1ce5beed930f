//! Command-line interface layer.
//!
//! Parses arguments, loads the document and config, and renders engine
//! results to the terminal or to JSON.

pub mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use run::run_cli;
