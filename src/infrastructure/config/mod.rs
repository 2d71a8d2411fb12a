//! Configuration resolution infrastructure
//!
//! Layered sources using figment:
//! - Documented defaults
//! - Optional dotenv file
//! - Environment variables (highest priority)
//! - Typed parsing, validation and the production guard

pub mod dotenv;
pub mod env_provider;
pub mod loader;
pub mod settings;

pub use env_provider::EnvMap;
pub use loader::{resolve, ConfigResolver, PLACEHOLDER_SECRETS};
pub use settings::{is_recognized, RECOGNIZED_VARS, SRID_PREFIX};
