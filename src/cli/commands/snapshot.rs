use std::io::{self, Write};

use anyhow::Result;

use super::context::{CommandContext, write_output};
use crate::{
    cli::{args::SnapshotCommand, exit_status::ExitStatus, report::print_success_to},
    core::snapshot as build_snapshot,
};

pub fn snapshot(cmd: SnapshotCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let context = ctx.active_context(&cmd.context)?;
    let component = ctx.component(&cmd.component)?;

    let snapshot = build_snapshot(&ctx.dsdb, component, &context);
    let json = ctx.config.to_json(&snapshot)?;

    match &cmd.output {
        Some(path) => {
            write_output(path, &json)?;
            print_success_to(
                &format!("Wrote snapshot of {} to {}", snapshot.component, path.display()),
                &mut io::stderr().lock(),
            );
        }
        None => writeln!(io::stdout().lock(), "{}", json)?,
    }

    Ok(ExitStatus::Success)
}
