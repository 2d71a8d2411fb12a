//! Domain layer: the configuration snapshot and its error type.

pub mod error;
pub mod models;

pub use error::ConfigError;
