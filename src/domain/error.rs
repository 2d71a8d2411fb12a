use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the runtime configuration.
///
/// Every variant is fatal to startup. None of the messages echo a secret value.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{setting}: cannot parse {value:?} as {expected}")]
    InvalidType {
        setting: String,
        value: String,
        expected: &'static str,
    },

    #[error("{setting}: {reason}")]
    InvalidValue { setting: String, reason: String },

    #[error("insecure default left in place while running in production: {}", settings.join(", "))]
    InsecureDefault { settings: Vec<String> },

    #[error("upload directory {} is unavailable: {source}", path.display())]
    FilesystemUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load dotenv file {}: {source}", path.display())]
    DotEnv {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("configuration source error: {0}")]
    Source(Box<figment::Error>),
}

impl ConfigError {
    pub(crate) fn invalid_type(setting: &str, value: &str, expected: &'static str) -> Self {
        Self::InvalidType {
            setting: setting.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    pub(crate) fn invalid_value(setting: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting: setting.to_string(),
            reason: reason.into(),
        }
    }

    /// Names of the environment variables this error is about, if any.
    pub fn settings(&self) -> Vec<&str> {
        match self {
            Self::InvalidType { setting, .. } | Self::InvalidValue { setting, .. } => {
                vec![setting.as_str()]
            }
            Self::InsecureDefault { settings } => settings.iter().map(String::as_str).collect(),
            Self::FilesystemUnavailable { .. } => vec!["UPLOAD_DIR"],
            Self::DotEnv { .. } | Self::Source(_) => vec![],
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Source(Box::new(err))
    }
}
