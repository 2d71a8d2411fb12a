//! `.env` file support
//!
//! The file is parsed with `dotenvy` without touching the process
//! environment; the pairs become a figment layer below the real environment.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::env_provider::EnvMap;
use crate::domain::error::ConfigError;

/// Load a dotenv file as a figment provider.
///
/// A missing file yields `Ok(None)`. An unreadable file or a malformed line
/// is an error.
pub fn load(path: &Path) -> Result<Option<EnvMap>, ConfigError> {
    let dotenv_error = |source| ConfigError::DotEnv {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no dotenv file");
            return Ok(None);
        }
        Err(err) => return Err(dotenv_error(err)),
    };
    let pairs = iter
        .collect::<Result<Vec<(String, String)>, _>>()
        .map_err(dotenv_error)?;

    debug!(path = %path.display(), entries = pairs.len(), "dotenv file loaded");
    Ok(Some(EnvMap::from_vars(
        format!("dotenv file {}", path.display()),
        pairs,
    )))
}
