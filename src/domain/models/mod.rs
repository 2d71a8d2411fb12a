//! Domain models for the resolved configuration

pub mod config;
pub mod database;
pub mod environment;
pub mod uploads;
pub mod web;

pub use config::ConfigSnapshot;
pub use database::DatabaseSettings;
pub use environment::{EnvironmentMode, LogFormat, LogLevel, LoggingSettings, ParseSettingError};
pub use uploads::{SpatialReferences, UploadSettings};
pub use web::{AdminCredentials, AllowedOrigins, CorsSettings, PaginationSettings, SessionSettings};

use serde::Serializer;

/// Marker written in place of secret values in debug and serialized output.
pub const REDACTED: &str = "[REDACTED]";

pub(crate) fn redact<T: ?Sized, S: Serializer>(_value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}
