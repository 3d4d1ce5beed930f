use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use super::context::CommandContext;
use crate::{
    cli::{
        args::ContextsCommand,
        exit_status::ExitStatus,
        report::{column_width, pad},
    },
    core::{ActiveContext, Dsdb, data::Token, ordered_dimensions, relevant_dimensions},
};

pub fn contexts(cmd: ContextsCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let context = ctx.active_context(&cmd.context)?;

    let (scope, tokens) = match &cmd.component {
        Some(query) => {
            let component = ctx.component(query)?;
            (component.display_name.clone(), ctx.component_tokens(component))
        }
        None => {
            let prefix = &ctx.config.system_token_prefix;
            (prefix.clone(), ctx.prefix_tokens(prefix))
        }
    };

    write_contexts(&ctx.dsdb, &scope, &tokens, &context, &mut io::stdout().lock())?;
    Ok(ExitStatus::Success)
}

fn write_contexts<W: Write>(
    dsdb: &Dsdb,
    scope: &str,
    tokens: &[&Token],
    context: &ActiveContext,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{} ({} {})",
        scope.bold(),
        tokens.len(),
        if tokens.len() == 1 { "token" } else { "tokens" }
    )?;

    let relevant = relevant_dimensions(dsdb, tokens, context);

    for dimension in ordered_dimensions(dsdb) {
        let is_relevant = relevant.iter().any(|g| g.name == dimension.group.name);
        writeln!(writer)?;
        writeln!(
            writer,
            "{} ({})  {}",
            dimension.group.context_tag_group_name.bold(),
            dimension.group.display_name,
            if is_relevant {
                "relevant".green()
            } else {
                "not relevant".dimmed()
            }
        )?;

        let selected = context.selection(&dimension.group.name);
        let width = column_width(dimension.tags.iter().map(|t| t.tag_name.as_str()));
        for tag in &dimension.tags {
            let marker = if selected == Some(tag.name.as_str()) {
                "*".green()
            } else {
                " ".normal()
            };
            writeln!(
                writer,
                "  {} {}  {}",
                marker,
                pad(&tag.tag_name, width),
                tag.display_name.dimmed()
            )?;
        }
    }
    Ok(())
}
