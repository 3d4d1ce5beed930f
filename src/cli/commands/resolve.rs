use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use super::context::CommandContext;
use crate::{
    cli::{
        args::ResolveCommand,
        exit_status::ExitStatus,
        report::{column_width, format_style_value, pad},
    },
    core::{
        ActiveContext, Dsdb, Resolution, data::Token, resolve_chain, select_best, serialize,
    },
};

pub fn resolve(cmd: ResolveCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let context = ctx.active_context(&cmd.context)?;
    let token = ctx.token(&cmd.token)?;

    write_resolution(&ctx.dsdb, token, &context, &mut io::stdout().lock())?;
    Ok(ExitStatus::Success)
}

fn write_resolution<W: Write>(
    dsdb: &Dsdb,
    token: &Token,
    context: &ActiveContext,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}  {}  {}",
        token.token_name.bold(),
        token.name.dimmed(),
        token.token_value_type.to_string().cyan()
    )?;
    writeln!(writer, "context: {}", describe_context(dsdb, context))?;
    if let Some(deprecation) = &token.deprecation_message {
        write!(writer, "{} {}", "deprecated:".yellow(), deprecation.message)?;
        match &deprecation.replacement_token_name {
            Some(replacement) => writeln!(writer, " (use `{}`)", replacement)?,
            None => writeln!(writer)?,
        }
    }
    writeln!(writer)?;

    let candidates = resolve_chain(dsdb, &token.name);
    if candidates.is_empty() {
        writeln!(writer, "No contextual references")?;
        return Ok(());
    }

    let active = context.tag_names(dsdb);
    let best = select_best(&candidates, &active);
    let labels: Vec<String> = candidates.iter().map(tag_label).collect();
    let width = column_width(labels.iter().map(String::as_str));

    for (candidate, label) in candidates.iter().zip(&labels) {
        let selected = best.is_some_and(|b| std::ptr::eq(b, candidate));
        let marker = if selected { "*".green() } else { " ".normal() };
        let label = pad(label, width);
        writeln!(
            writer,
            "{} {}  {}",
            marker,
            if selected { label.green() } else { label.normal() },
            candidate.resolved_value
        )?;
        if !candidate.chain.is_empty() {
            writeln!(writer, "    {}", describe_chain(dsdb, candidate).dimmed())?;
        }
    }

    writeln!(writer)?;
    match best {
        Some(best) => writeln!(
            writer,
            "value: {}",
            format_style_value(serialize(best.resolved_value).as_ref())
        ),
        None => writeln!(writer, "value: {}", "(no applicable candidate)".yellow()),
    }
}

fn tag_label(candidate: &Resolution<'_>) -> String {
    if candidate.is_default() {
        "[default]".to_string()
    } else {
        format!("[{}]", candidate.context_tags.join(", "))
    }
}

/// Chain of value identities, shown by alias where the value has one.
fn describe_chain(dsdb: &Dsdb, candidate: &Resolution<'_>) -> String {
    candidate
        .chain
        .iter()
        .map(|&name| {
            dsdb.value(name)
                .and_then(|value| value.token_name.as_deref())
                .unwrap_or(name)
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub(super) fn describe_context(dsdb: &Dsdb, context: &ActiveContext) -> String {
    context
        .describe(dsdb)
        .iter()
        .map(|(dimension, tag)| format!("{}={}", dimension, tag))
        .collect::<Vec<_>>()
        .join(", ")
}
