//! geoweb-config - runtime configuration for the geoweb GIS service
//!
//! Resolves the service's settings once at startup from environment variables
//! (optionally backed by a dotenv file), validates them, refuses placeholder
//! secrets in production, and hands out an immutable [`ConfigSnapshot`].
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the snapshot, its parts and [`ConfigError`]
//! - **Infrastructure Layer** (`infrastructure`): source layering, parsing,
//!   validation and logging setup
//! - **CLI Layer** (`cli`): `check` / `show` commands for operators
//!
//! # Example
//!
//! ```no_run
//! use geoweb_config::ConfigResolver;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigResolver::new().with_dotenv(".env").resolve_process()?;
//!     println!("connecting to {}", config.redacted_database_url());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{
    AdminCredentials, AllowedOrigins, ConfigSnapshot, CorsSettings, DatabaseSettings,
    EnvironmentMode, LogFormat, LogLevel, LoggingSettings, PaginationSettings, SessionSettings,
    SpatialReferences, UploadSettings,
};
pub use domain::ConfigError;
pub use infrastructure::config::{resolve, ConfigResolver};
