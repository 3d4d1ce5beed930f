//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `summary`: System metadata and record counts
//! - `components`: List or search components
//! - `resolve`: Every candidate of one token, with the selected one marked
//! - `contexts`: Context dimensions, current selection and relevance
//! - `tree`: Display-group tree of a component with selected values
//! - `map`: Token-name tree
//! - `export`: Flat `tokenName -> value` JSON
//! - `snapshot`: A component's tree with values inlined, as JSON
//! - `init`: Write a default `.dsdbrc.json`

use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Summary(cmd)) => cmd.common.verbose,
            Some(Command::Components(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Contexts(cmd)) => cmd.common.verbose,
            Some(Command::Tree(cmd)) => cmd.common.verbose,
            Some(Command::Map(cmd)) => cmd.common.verbose,
            Some(Command::Export(cmd)) => cmd.common.verbose,
            Some(Command::Snapshot(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands that read a document.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// DSDB JSON export to read
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// One `DIMENSION=TAG` selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOverride {
    pub dimension: String,
    pub tag: String,
}

impl FromStr for ContextOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dimension, tag) = s
            .split_once('=')
            .ok_or_else(|| format!("expected DIMENSION=TAG, got '{}'", s))?;
        let (dimension, tag) = (dimension.trim(), tag.trim());
        if dimension.is_empty() || tag.is_empty() {
            return Err(format!("expected DIMENSION=TAG, got '{}'", s));
        }
        Ok(Self {
            dimension: dimension.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ContextOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension, self.tag)
    }
}

/// Context selection applied on top of defaults and the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ContextArgs {
    /// Select a context tag, e.g. `-c theme=dark` (repeatable)
    #[arg(short = 'c', long = "context", value_name = "DIMENSION=TAG")]
    pub overrides: Vec<ContextOverride>,
}

#[derive(Debug, Args)]
pub struct SummaryCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ComponentsCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Filter by display name, identity or alternative name (regex or text)
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Token alias (`md.sys.color.primary`) or identity
    pub token: String,

    #[command(flatten)]
    pub context: ContextArgs,
}

#[derive(Debug, Args)]
pub struct ContextsCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Analyze relevance for this component instead of the system tokens
    #[arg(long)]
    pub component: Option<String>,

    #[command(flatten)]
    pub context: ContextArgs,
}

#[derive(Debug, Args)]
pub struct TreeCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Component display name or identity
    #[arg(long)]
    pub component: String,

    #[command(flatten)]
    pub context: ContextArgs,
}

#[derive(Debug, Args)]
pub struct MapCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only show the subtree at this dotted prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Export the tokens of this component
    #[arg(long, conflicts_with = "prefix")]
    pub component: Option<String>,

    /// Export the tokens under this dotted prefix (overrides config file)
    #[arg(long)]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when the export produced findings
    #[arg(long)]
    pub deny_findings: bool,
}

#[derive(Debug, Args)]
pub struct SnapshotCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Component display name or identity
    #[arg(long)]
    pub component: String,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show system metadata and record counts
    Summary(SummaryCommand),
    /// List components, optionally filtered
    Components(ComponentsCommand),
    /// Show every candidate value of a token and the one selected
    Resolve(ResolveCommand),
    /// Show context dimensions and which of them affect the tokens
    Contexts(ContextsCommand),
    /// Show a component's display-group tree with selected values
    Tree(TreeCommand),
    /// Show the token-name tree
    Map(MapCommand),
    /// Export resolved token values as flat JSON
    Export(ExportCommand),
    /// Export a component's tree with values inlined as JSON
    Snapshot(SnapshotCommand),
    /// Initialize a new .dsdbrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use crate::cli::args::*;

    #[test]
    fn test_parse_context_override() {
        let parsed: ContextOverride = "theme=dark".parse().unwrap();
        assert_eq!(
            parsed,
            ContextOverride {
                dimension: "theme".to_string(),
                tag: "dark".to_string(),
            }
        );
        assert_eq!(parsed.to_string(), "theme=dark");

        assert!("theme".parse::<ContextOverride>().is_err());
        assert!("=dark".parse::<ContextOverride>().is_err());
    }

    #[test]
    fn test_parse_export_command() {
        let args = Arguments::try_parse_from([
            "dsdb", "export", "tokens.json", "-c", "theme=dark", "-c", "density=compact",
            "--prefix", "md.sys.color", "-v",
        ])
        .unwrap();
        assert!(args.verbose());
        let Some(Command::Export(cmd)) = args.command else {
            panic!("expected export command");
        };
        assert_eq!(cmd.common.file, PathBuf::from("tokens.json"));
        assert_eq!(cmd.context.overrides.len(), 2);
        assert_eq!(cmd.prefix.as_deref(), Some("md.sys.color"));
        assert!(!cmd.deny_findings);
    }

    #[test]
    fn test_component_conflicts_with_prefix() {
        let result = Arguments::try_parse_from([
            "dsdb", "export", "tokens.json", "--component", "Button", "--prefix", "md.sys",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_positional_order() {
        let args =
            Arguments::try_parse_from(["dsdb", "resolve", "tokens.json", "md.sys.color.primary"])
                .unwrap();
        let Some(Command::Resolve(cmd)) = args.command else {
            panic!("expected resolve command");
        };
        assert_eq!(cmd.token, "md.sys.color.primary");
    }
}
