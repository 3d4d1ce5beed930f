use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use super::context::CommandContext;
use crate::{
    cli::{args::TreeCommand, exit_status::ExitStatus, report::format_style_value},
    core::{
        ActiveContext, Dsdb, GroupNode, TagSet,
        data::{Component, Token},
        resolve_chain, select_best, serialize, token_sets_for_component,
    },
};

const INDENT: &str = "  ";

pub fn tree(cmd: TreeCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let context = ctx.active_context(&cmd.context)?;
    let component = ctx.component(&cmd.component)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", component.display_name.bold())?;
    write_tree(&ctx.dsdb, component, &context, &mut stdout)?;
    Ok(ExitStatus::Success)
}

fn write_tree<W: Write>(
    dsdb: &Dsdb,
    component: &Component,
    context: &ActiveContext,
    writer: &mut W,
) -> io::Result<()> {
    let active = context.tag_names(dsdb);
    let sets = token_sets_for_component(dsdb, component);
    if sets.is_empty() {
        writeln!(writer, "{}", "(no token sets)".dimmed())?;
    }

    for set in &sets {
        writeln!(
            writer,
            "{} ({})",
            set.token_set.token_set_name.cyan(),
            set.token_set.display_name
        )?;
        for root in &set.forest.roots {
            write_group(dsdb, root, &active, 1, writer)?;
        }
        if !set.forest.ungrouped.is_empty() {
            writeln!(writer, "{}{}", INDENT, "(ungrouped)".dimmed())?;
            for token in &set.forest.ungrouped {
                write_token(dsdb, token, &active, 2, writer)?;
            }
        }
    }
    Ok(())
}

fn write_group<W: Write>(
    dsdb: &Dsdb,
    node: &GroupNode<'_>,
    active: &TagSet<'_>,
    depth: usize,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{}{}", INDENT.repeat(depth), node.group.display_name.bold())?;
    for token in &node.tokens {
        write_token(dsdb, token, active, depth + 1, writer)?;
    }
    for child in &node.children {
        write_group(dsdb, child, active, depth + 1, writer)?;
    }
    Ok(())
}

fn write_token<W: Write>(
    dsdb: &Dsdb,
    token: &Token,
    active: &TagSet<'_>,
    depth: usize,
    writer: &mut W,
) -> io::Result<()> {
    let candidates = resolve_chain(dsdb, &token.name);
    let value = select_best(&candidates, active).and_then(|best| serialize(best.resolved_value));
    writeln!(
        writer,
        "{}{}  {}",
        INDENT.repeat(depth),
        token.token_name,
        format_style_value(value.as_ref()).dimmed()
    )
}
