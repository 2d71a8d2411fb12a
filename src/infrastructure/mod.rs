//! Infrastructure layer module
//!
//! - Configuration resolution (figment layering, dotenv, validation)
//! - Logging infrastructure

pub mod config;
pub mod logging;
