use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use super::context::CommandContext;
use crate::cli::{args::SummaryCommand, exit_status::ExitStatus, report::print_pairs};

pub fn summary(cmd: SummaryCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    write_summary(&ctx, &mut io::stdout().lock())?;
    Ok(ExitStatus::Success)
}

fn write_summary<W: Write>(ctx: &CommandContext, writer: &mut W) -> io::Result<()> {
    let info = ctx.dsdb.info();
    let stats = ctx.dsdb.stats();

    writeln!(writer, "{} ({})", info.display_name.bold(), info.name)?;
    if !info.description.is_empty() {
        writeln!(writer, "{}", info.description)?;
    }
    writeln!(writer)?;
    print_pairs(
        &[
            ("token prefix", info.token_name_prefix.clone()),
            ("dsdb version", info.dsdb_version.clone()),
            ("revision", info.revision_id.clone()),
        ],
        writer,
    )?;
    writeln!(writer)?;
    print_pairs(
        &[
            ("components", stats.components.to_string()),
            ("token sets", stats.token_sets.to_string()),
            ("tokens", stats.tokens.to_string()),
            ("values", stats.values.to_string()),
            ("display groups", stats.display_groups.to_string()),
            ("context dimensions", stats.context_tag_groups.to_string()),
            ("context tags", stats.tags.to_string()),
            ("reference trees", stats.contextual_reference_trees.to_string()),
        ],
        writer,
    )
}
