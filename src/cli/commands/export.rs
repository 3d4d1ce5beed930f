use std::io::{self, Write};

use anyhow::Result;

use super::context::{CommandContext, write_output};
use crate::{
    cli::{
        args::ExportCommand,
        exit_status::ExitStatus,
        report::{self, print_success_to},
    },
    config::matches_token_filter,
    core::{data::Token, export_tokens},
};

pub fn export(cmd: ExportCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let context = ctx.active_context(&cmd.context)?;

    let scoped: Vec<&Token> = match (&cmd.component, &cmd.prefix) {
        (Some(query), _) => ctx.component_tokens(ctx.component(query)?),
        (None, Some(prefix)) => ctx.prefix_tokens(prefix),
        (None, None) => ctx.prefix_tokens(&ctx.config.system_token_prefix),
    };

    let patterns = ctx.config.token_filter_patterns()?;
    let tokens: Vec<&Token> = scoped
        .into_iter()
        .filter(|token| matches_token_filter(&patterns, &token.token_name))
        .collect();
    tracing::debug!("exporting {} tokens", tokens.len());

    let export = export_tokens(&ctx.dsdb, &tokens, &context);
    let json = ctx.config.to_json(&export.entries)?;

    match &cmd.output {
        Some(path) => {
            write_output(path, &json)?;
            print_success_to(
                &format!("Wrote {} tokens to {}", export.entries.len(), path.display()),
                &mut io::stderr().lock(),
            );
        }
        None => writeln!(io::stdout().lock(), "{}", json)?,
    }

    report::report(&export.findings);

    if cmd.deny_findings && !export.findings.is_empty() {
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}
