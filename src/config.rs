use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".dsdbrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Alias prefix exported and analyzed when no component is given.
    #[serde(default = "default_system_token_prefix")]
    pub system_token_prefix: String,
    /// Context dimension -> tag overrides applied before CLI `--context`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Glob patterns on token aliases; when non-empty, only matching tokens
    /// are exported.
    #[serde(default)]
    pub token_filter: Vec<String>,
    #[serde(default = "default_pretty_output")]
    pub pretty_output: bool,
}

fn default_system_token_prefix() -> String {
    "md.sys".to_string()
}

fn default_pretty_output() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_token_prefix: default_system_token_prefix(),
            context: BTreeMap::new(),
            token_filter: Vec::new(),
            pretty_output: default_pretty_output(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `tokenFilter` is invalid.
    pub fn validate(&self) -> Result<()> {
        self.token_filter_patterns()?;
        Ok(())
    }

    pub fn token_filter_patterns(&self) -> Result<Vec<Pattern>> {
        self.token_filter
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'tokenFilter': \"{}\"", pattern)
                })
            })
            .collect()
    }

    /// Serialize JSON output according to `prettyOutput`.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty_output {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("Failed to serialize output.")
    }
}

/// Whether `alias` passes the filter. An empty filter passes everything.
pub fn matches_token_filter(patterns: &[Pattern], alias: &str) -> bool {
    patterns.is_empty() || patterns.iter().any(|pattern| pattern.matches(alias))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
