use std::{env, fs, path::Path};

use anyhow::{Context as _, Result, bail};

use crate::{
    cli::args::{CommonArgs, ContextArgs},
    config::{Config, load_config},
    core::{
        ActiveContext, Dsdb, TokenMap, data::{Component, Token}, token_sets_for_component,
    },
};

/// Data shared by every command that reads a document.
///
/// Holds the loaded store and configuration; contexts and scopes are derived
/// per command.
pub struct CommandContext {
    pub dsdb: Dsdb,
    pub config: Config,
}

impl CommandContext {
    /// Load the document named in `args` and the config found from the
    /// working directory.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the working directory")?;
        let config_result = load_config(&cwd)?;

        // In verbose mode, inform user if using default config
        if args.verbose && !config_result.from_file {
            eprintln!("Note: No .dsdbrc.json found, using default configuration");
        }

        let dsdb = load_dsdb(&args.file)?;

        Ok(Self {
            dsdb,
            config: config_result.config,
        })
    }

    /// Defaults, then the config file's `context`, then `-c` flags.
    pub fn active_context(&self, args: &ContextArgs) -> Result<ActiveContext> {
        let mut context = ActiveContext::defaults(&self.dsdb);

        for (dimension, tag) in &self.config.context {
            context
                .apply_override(&self.dsdb, dimension, tag)
                .with_context(|| format!("Invalid 'context' entry in config: {}={}", dimension, tag))?;
        }
        for selection in &args.overrides {
            context
                .apply_override(&self.dsdb, &selection.dimension, &selection.tag)
                .with_context(|| format!("Invalid --context {}", selection))?;
        }

        Ok(context)
    }

    pub fn component(&self, query: &str) -> Result<&Component> {
        match self.dsdb.find_component(query) {
            Some(component) => Ok(component),
            None => bail!("Component '{}' not found", query),
        }
    }

    pub fn token(&self, query: &str) -> Result<&Token> {
        match self.dsdb.find_token(query) {
            Some(token) => Ok(token),
            None => bail!("Token '{}' not found", query),
        }
    }

    /// Every token of a component, grouped tokens first, in tree order.
    pub fn component_tokens<'a>(&'a self, component: &Component) -> Vec<&'a Token> {
        token_sets_for_component(&self.dsdb, component)
            .iter()
            .flat_map(|set| set.forest.collect_tokens())
            .collect()
    }

    /// Tokens whose alias lies under `prefix`.
    pub fn prefix_tokens(&self, prefix: &str) -> Vec<&Token> {
        TokenMap::build(self.dsdb.tokens()).tokens_under(prefix)
    }
}

fn load_dsdb(path: &Path) -> Result<Dsdb> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Dsdb::from_json(&content).with_context(|| format!("Failed to load {}", path.display()))
}

/// Write command output to `path`, creating parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write {}", path.display()))
}
