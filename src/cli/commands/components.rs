use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use regex::{Regex, RegexBuilder};

use super::context::CommandContext;
use crate::{
    cli::{
        args::ComponentsCommand,
        exit_status::ExitStatus,
        report::{column_width, pad},
    },
    core::data::Component,
};

pub fn components(cmd: ComponentsCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let filter = cmd.search.as_deref().map(Search::new);

    let matched: Vec<&Component> = ctx
        .dsdb
        .components()
        .iter()
        .filter(|component| filter.as_ref().is_none_or(|search| search.matches(component)))
        .collect();

    let mut stdout = io::stdout().lock();
    if matched.is_empty() {
        match &cmd.search {
            Some(search) => writeln!(stdout, "No components match '{}'", search)?,
            None => writeln!(stdout, "No components")?,
        }
        return Ok(ExitStatus::Success);
    }

    write_components(&matched, &mut stdout)?;
    Ok(ExitStatus::Success)
}

/// `--search` text: a case-insensitive regex, or plain text when it does not
/// compile.
enum Search {
    Pattern(Regex),
    Text(String),
}

impl Search {
    fn new(search: &str) -> Self {
        match RegexBuilder::new(search).case_insensitive(true).build() {
            Ok(re) => Search::Pattern(re),
            Err(_) => Search::Text(search.to_string()),
        }
    }

    fn matches(&self, component: &Component) -> bool {
        match self {
            Search::Pattern(re) => std::iter::once(&component.display_name)
                .chain(std::iter::once(&component.name))
                .chain(component.alternative_names.iter())
                .any(|candidate| re.is_match(candidate)),
            Search::Text(text) => component.matches(text),
        }
    }
}

fn write_components<W: Write>(components: &[&Component], writer: &mut W) -> io::Result<()> {
    let width = column_width(components.iter().map(|c| c.display_name.as_str()));
    for component in components {
        let sets = component.token_sets.len();
        writeln!(
            writer,
            "{}  {}  {}",
            pad(&component.display_name, width).bold(),
            component.name.dimmed(),
            format!("({} token {})", sets, if sets == 1 { "set" } else { "sets" }).dimmed()
        )?;
    }
    Ok(())
}
