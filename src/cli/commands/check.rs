//! Implementation of the `geoweb-config check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::ResolveArgs;
use crate::domain::models::{ConfigSnapshot, EnvironmentMode};

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub mode: EnvironmentMode,
    pub database_url: String,
    pub upload_directory: PathBuf,
    pub warnings: Vec<String>,
}

impl CheckOutput {
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        Self {
            success: true,
            mode: snapshot.mode(),
            database_url: snapshot.redacted_database_url(),
            upload_directory: snapshot.upload_directory().to_path_buf(),
            warnings: snapshot
                .production_warnings()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Configuration OK ({} mode)", self.mode),
            format!("  database:   {}", self.database_url),
            format!("  uploads:    {}", self.upload_directory.display()),
        ];
        if !self.warnings.is_empty() {
            lines.push("\nWarnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  - {warning}"));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &ResolveArgs, json_mode: bool) -> Result<()> {
    let snapshot = args
        .resolver()
        .resolve_process()
        .context("configuration is not valid for startup")?;
    output(&CheckOutput::from_snapshot(&snapshot), json_mode);
    Ok(())
}
