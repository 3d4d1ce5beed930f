use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        components::components, contexts::contexts, export::export, init::init, map::map,
        resolve::resolve, snapshot::snapshot, summary::summary, tree::tree,
    },
    exit_status::ExitStatus,
};

/// Main entry point for the dsdb CLI.
///
/// Prints help and succeeds when no command is given.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Summary(cmd)) => summary(cmd),
        Some(Command::Components(cmd)) => components(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Contexts(cmd)) => contexts(cmd),
        Some(Command::Tree(cmd)) => tree(cmd),
        Some(Command::Map(cmd)) => map(cmd),
        Some(Command::Export(cmd)) => export(cmd),
        Some(Command::Snapshot(cmd)) => snapshot(cmd),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}
