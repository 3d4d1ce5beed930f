use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod browse;
mod export;
mod init;
mod snapshot;

const BIN_NAME: &str = "dsdb";

/// File name the fixture document is copied to.
pub const DOCUMENT: &str = "tokens.json";

const FIXTURE: &str = include_str!("../fixtures/dsdb.json");

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    /// An empty project. A `.git` marker keeps config discovery inside it.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project holding the fixture document as `tokens.json`.
    pub fn with_fixture() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(DOCUMENT, FIXTURE)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// `dsdb <subcommand> tokens.json`
    pub fn document_command(&self, subcommand: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg(subcommand).arg(DOCUMENT);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run a command and capture stdout, stderr and the exit code.
pub fn run(cmd: &mut Command) -> Result<(String, String, i32)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().context("Failed to run dsdb")?;
    Ok((
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
        status.code().unwrap_or(-1),
    ))
}
