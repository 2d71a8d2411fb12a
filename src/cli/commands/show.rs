//! Implementation of the `geoweb-config show` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::ResolveArgs;
use crate::domain::models::{AllowedOrigins, ConfigSnapshot};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShowOutput {
    snapshot: ConfigSnapshot,
}

impl ShowOutput {
    pub const fn new(snapshot: ConfigSnapshot) -> Self {
        Self { snapshot }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let s = &self.snapshot;
        let extensions: Vec<&str> = s.allowed_upload_extensions().iter().map(String::as_str).collect();
        let origins = match &s.cors().allow_origins {
            AllowedOrigins::Any => "*".to_string(),
            AllowedOrigins::List(list) => list.join(", "),
        };

        let mut lines = vec![
            format!("mode                  {}", s.mode()),
            format!("secret_key            {}", crate::domain::models::REDACTED),
            format!("database_url          {}", s.redacted_database_url()),
            format!("upload_directory      {}", s.upload_directory().display()),
            format!("max_upload_bytes      {}", s.max_upload_bytes()),
            format!("allowed_extensions    {}", extensions.join(", ")),
            format!("admin_login           {}", s.default_admin_login()),
            format!("debug                 {}", s.debug()),
            format!("timezone              {}", s.timezone()),
            format!("cors_allow_origins    {origins}"),
            format!("cors_max_age          {}s", s.cors().max_age_secs),
            format!("session_lifetime      {}s", s.session().lifetime_secs),
            format!("session_secure        {}", s.session().secure),
            format!(
                "pagination            default {}, max {}",
                s.pagination().default_limit,
                s.pagination().max_limit
            ),
            format!("log                   {} ({:?})", s.logging().level, s.logging().format),
        ];
        for (name, id) in s.spatial_reference_ids().iter() {
            lines.push(format!("srid {name:<16} {id}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.snapshot).unwrap_or_default()
    }
}

pub fn execute(args: &ResolveArgs, json_mode: bool) -> Result<()> {
    let snapshot = args
        .resolver()
        .resolve_process()
        .context("failed to resolve configuration")?;
    output(&ShowOutput::new(snapshot), json_mode);
    Ok(())
}
