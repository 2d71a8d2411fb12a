//! Operator CLI: validate or inspect the configuration a deployment would start with.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::models::EnvironmentMode;
use crate::infrastructure::config::ConfigResolver;

pub use output::{output, CommandOutput};

#[derive(Parser, Debug)]
#[command(name = "geoweb-config")]
#[command(about = "Resolve and validate geoweb runtime configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and report whether startup would succeed
    Check(ResolveArgs),

    /// Print the resolved configuration with secrets redacted
    Show(ResolveArgs),
}

impl Commands {
    pub const fn resolve_args(&self) -> &ResolveArgs {
        match self {
            Self::Check(args) | Self::Show(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Directory that a relative UPLOAD_DIR resolves against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Dotenv file layered below the process environment [default: <base-dir>/.env]
    #[arg(long, value_name = "PATH", conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not read any dotenv file
    #[arg(long)]
    pub no_env_file: bool,

    /// Override APP_ENV (development, test, production)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<EnvironmentMode>,
}

impl ResolveArgs {
    pub fn resolver(&self) -> ConfigResolver {
        let mut resolver = ConfigResolver::new().with_base_dir(&self.base_dir);
        if !self.no_env_file {
            let env_file = self
                .env_file
                .clone()
                .unwrap_or_else(|| self.base_dir.join(".env"));
            resolver = resolver.with_dotenv(env_file);
        }
        if let Some(mode) = self.mode {
            resolver = resolver.with_mode(mode);
        }
        resolver
    }
}

/// Print `err` in the requested format and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain.get(1..).unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
