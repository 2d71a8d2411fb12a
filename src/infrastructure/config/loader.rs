use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::providers::Serialized;
use figment::Figment;
use tracing::{debug, info, instrument, warn};

use super::dotenv;
use super::env_provider::EnvMap;
use super::settings::{RawSettings, DEFAULT_UPLOAD_DIR_NAME, RECOGNIZED_VARS, SRID_PREFIX};
use crate::domain::error::ConfigError;
use crate::domain::models::config::SnapshotParts;
use crate::domain::models::{
    AdminCredentials, AllowedOrigins, ConfigSnapshot, CorsSettings, DatabaseSettings,
    EnvironmentMode, LogFormat, LogLevel, LoggingSettings, PaginationSettings, SessionSettings,
    SpatialReferences, UploadSettings,
};

/// Values treated as "operator never set this secret", compared ignoring ASCII case.
pub const PLACEHOLDER_SECRETS: &[&str] =
    &["CHANGE_ME", "CHANGEME", "CHANGE-ME", "REPLACE_ME", "PLACEHOLDER"];

/// Settings the production guard checks.
const GUARDED_SECRETS: &[&str] = &["SECRET_KEY", "DB_PASSWORD", "DEFAULT_ADMIN_PASSWORD"];

/// Resolves a [`ConfigSnapshot`] from environment variables.
///
/// Precedence (lowest to highest):
/// 1. Documented defaults (Serialized)
/// 2. Dotenv file, if configured
/// 3. The environment passed to [`ConfigResolver::resolve`]
///
/// A mode set with [`ConfigResolver::with_mode`] wins over `APP_ENV`.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: PathBuf,
    mode: Option<EnvironmentMode>,
    dotenv_path: Option<PathBuf>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver rooted at the current directory, mode taken from `APP_ENV`, no dotenv file.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            mode: None,
            dotenv_path: None,
        }
    }

    /// Directory that a relative (or absent) `UPLOAD_DIR` resolves against.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: EnvironmentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_dotenv(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Resolve from the variables of the current process.
    pub fn resolve_process(&self) -> Result<ConfigSnapshot, ConfigError> {
        self.resolve_env(EnvMap::from_process())
    }

    /// Resolve from an explicit environment mapping.
    ///
    /// Fails on the first invalid setting; insecure production secrets are
    /// reported together. No partial snapshot is ever returned.
    pub fn resolve<I, K, V>(&self, vars: I) -> Result<ConfigSnapshot, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.resolve_env(EnvMap::from_vars("environment", vars))
    }

    /// Best-effort `LOG_LEVEL` / `LOG_FORMAT` from the process environment and
    /// the dotenv file, for bringing up logging before resolution runs.
    ///
    /// Missing, unreadable or unparsable values fall back to the defaults; the
    /// full resolution reports them properly.
    pub fn bootstrap_logging(&self) -> LoggingSettings {
        self.bootstrap_logging_from(&EnvMap::from_process())
    }

    fn bootstrap_logging_from(&self, environment: &EnvMap) -> LoggingSettings {
        let file = self.dotenv_layer(environment).ok().flatten();
        LoggingSettings::from_lookup_lossy(|key| {
            environment
                .get(key)
                .or_else(|| file.as_ref().and_then(|file| file.get(key)))
                .map(String::from)
        })
    }

    /// The dotenv file, minus any name the environment sets (even to a blank value).
    fn dotenv_layer(&self, environment: &EnvMap) -> Result<Option<EnvMap>, ConfigError> {
        let Some(path) = &self.dotenv_path else {
            return Ok(None);
        };
        Ok(dotenv::load(path)?.map(|file| file.without(environment.blank_names())))
    }

    #[instrument(skip_all, fields(base_dir = %self.base_dir.display()))]
    fn resolve_env(&self, environment: EnvMap) -> Result<ConfigSnapshot, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(RawSettings::default()));
        if let Some(file) = self.dotenv_layer(&environment)? {
            figment = figment.merge(file);
        }
        let figment = figment.merge(environment);

        log_provenance(&figment);
        let raw: RawSettings = figment.extract()?;

        let snapshot = ConfigSnapshot::assemble(self.parts(raw)?)?;
        guard_production(&snapshot)?;
        for warning in snapshot.production_warnings() {
            warn!(%warning, "risky production setting");
        }
        ensure_writable_dir(snapshot.upload_directory())?;

        info!(
            mode = %snapshot.mode(),
            database = %snapshot.redacted_database_url(),
            upload_dir = %snapshot.upload_directory().display(),
            srids = snapshot.spatial_reference_ids().len(),
            "configuration resolved"
        );
        Ok(snapshot)
    }

    fn parts(&self, raw: RawSettings) -> Result<SnapshotParts, ConfigError> {
        let mode = match self.mode {
            Some(mode) => mode,
            None => parse_setting("APP_ENV", &raw.app_env, EnvironmentMode::EXPECTED)?,
        };

        let database = DatabaseSettings::new(
            raw.db_host,
            parse_port(&raw.db_port)?,
            raw.db_name,
            raw.db_user,
            raw.db_password,
        );

        let max_upload_bytes: u64 = parse_setting(
            "MAX_UPLOAD_BYTES",
            &raw.max_upload_bytes,
            "a non-negative integer",
        )?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::invalid_value("MAX_UPLOAD_BYTES", "must be positive"));
        }
        let uploads = UploadSettings::new(
            self.upload_directory(raw.upload_dir.as_deref())?,
            max_upload_bytes,
            parse_extensions(&raw.allowed_upload_extensions)?,
        );

        let cors = CorsSettings {
            allow_origins: parse_origins(&raw.cors_allow_origins)?,
            max_age_secs: parse_setting("CORS_MAX_AGE", &raw.cors_max_age, "a non-negative integer")?,
        };

        let session = SessionSettings {
            lifetime_secs: parse_positive("SESSION_LIFETIME", &raw.session_lifetime)?,
            secure: parse_flag("SESSION_SECURE", &raw.session_secure)?,
        };

        let pagination = PaginationSettings {
            default_limit: parse_positive("PAGINATION_DEFAULT_LIMIT", &raw.pagination_default_limit)?,
            max_limit: parse_positive("PAGINATION_MAX_LIMIT", &raw.pagination_max_limit)?,
        };
        if pagination.default_limit > pagination.max_limit {
            return Err(ConfigError::invalid_value(
                "PAGINATION_DEFAULT_LIMIT",
                format!(
                    "default limit {} exceeds PAGINATION_MAX_LIMIT {}",
                    pagination.default_limit, pagination.max_limit
                ),
            ));
        }

        let logging = LoggingSettings {
            level: parse_setting::<LogLevel>("LOG_LEVEL", &raw.log_level, LogLevel::EXPECTED)?,
            format: parse_setting::<LogFormat>("LOG_FORMAT", &raw.log_format, LogFormat::EXPECTED)?,
        };

        Ok(SnapshotParts {
            mode,
            secret_key: raw.secret_key,
            database,
            uploads,
            spatial_reference_ids: parse_spatial_references(&raw.spatial_reference_ids)?,
            admin: AdminCredentials::new(raw.default_admin_login, raw.default_admin_password),
            debug: parse_flag("APP_DEBUG", &raw.app_debug)?,
            timezone: raw.app_timezone,
            cors,
            session,
            pagination,
            logging,
        })
    }

    fn upload_directory(&self, configured: Option<&str>) -> Result<PathBuf, ConfigError> {
        let base = std::path::absolute(&self.base_dir).map_err(|source| {
            ConfigError::FilesystemUnavailable {
                path: self.base_dir.clone(),
                source,
            }
        })?;
        Ok(base.join(configured.map_or(DEFAULT_UPLOAD_DIR_NAME, str::trim)))
    }
}

/// Resolve with default options; see [`ConfigResolver::resolve`].
pub fn resolve<I, K, V>(vars: I) -> Result<ConfigSnapshot, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ConfigResolver::new().resolve(vars)
}

fn log_provenance(figment: &Figment) {
    for name in RECOGNIZED_VARS {
        let key = name.to_ascii_lowercase();
        if let Some(metadata) = figment.find_metadata(&key) {
            debug!(setting = *name, source = %metadata.name, "setting resolved");
        }
    }
}

fn parse_setting<T: FromStr>(
    setting: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid_type(setting, value, expected))
}

fn parse_positive<T>(setting: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
{
    let parsed: T = parse_setting(setting, value, "a positive integer")?;
    if parsed == T::default() {
        return Err(ConfigError::invalid_value(setting, "must be positive"));
    }
    Ok(parsed)
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port: u32 = parse_setting("DB_PORT", value, "a port number")?;
    u16::try_from(port)
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ConfigError::invalid_value("DB_PORT", format!("{port} is outside 1-65535")))
}

/// Accepts `1|true|yes|on` and `0|false|no|off`, ignoring ASCII case.
fn parse_flag(setting: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_type(
            setting,
            value,
            "a boolean (true/false, yes/no, on/off, 1/0)",
        )),
    }
}

/// Comma-separated list, lower-cased, leading dots stripped, blanks dropped.
fn parse_extensions(value: &str) -> Result<BTreeSet<String>, ConfigError> {
    let extensions: BTreeSet<String> = value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();
    if extensions.is_empty() {
        return Err(ConfigError::invalid_value(
            "ALLOWED_UPLOAD_EXTENSIONS",
            "at least one extension is required",
        ));
    }
    Ok(extensions)
}

fn parse_origins(value: &str) -> Result<AllowedOrigins, ConfigError> {
    if value.trim() == "*" {
        return Ok(AllowedOrigins::Any);
    }
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();
    if origins.is_empty() {
        return Err(ConfigError::invalid_value(
            "CORS_ALLOW_ORIGINS",
            "expected \"*\" or a comma-separated list of origins",
        ));
    }
    Ok(AllowedOrigins::List(origins))
}

fn parse_spatial_references(raw: &BTreeMap<String, String>) -> Result<SpatialReferences, ConfigError> {
    let mut ids = BTreeMap::new();
    for (key, value) in raw {
        let setting = key.to_ascii_uppercase();
        let Some(name) = setting.strip_prefix(SRID_PREFIX) else {
            continue;
        };
        let id: u32 = parse_positive(&setting, value)?;
        ids.insert(name.to_string(), id);
    }
    Ok(SpatialReferences::new(ids))
}

fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDER_SECRETS.iter().any(|p| value.eq_ignore_ascii_case(p))
}

fn insecure_secrets(snapshot: &ConfigSnapshot) -> Vec<String> {
    let values = [
        snapshot.secret_key(),
        snapshot.database().password(),
        snapshot.default_admin_password(),
    ];
    GUARDED_SECRETS
        .iter()
        .zip(values)
        .filter(|(_, value)| is_placeholder(value))
        .map(|(name, _)| (*name).to_string())
        .collect()
}

/// Refuse placeholder or empty secrets in production.
fn guard_production(snapshot: &ConfigSnapshot) -> Result<(), ConfigError> {
    let settings = insecure_secrets(snapshot);
    if settings.is_empty() {
        return Ok(());
    }
    if snapshot.mode().is_production() {
        return Err(ConfigError::InsecureDefault { settings });
    }
    warn!(
        mode = %snapshot.mode(),
        settings = %settings.join(", "),
        "placeholder secrets in use; these are refused in production"
    );
    Ok(())
}

/// Create `dir` (and parents) and check that a file can be written in it.
fn ensure_writable_dir(dir: &Path) -> Result<(), ConfigError> {
    let unavailable = |source| ConfigError::FilesystemUnavailable {
        path: dir.to_path_buf(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(unavailable)?;
    // Anonymous temp file, removed on drop.
    tempfile::tempfile_in(dir).map_err(unavailable)?;
    debug!(path = %dir.display(), "upload directory ready");
    Ok(())
}
