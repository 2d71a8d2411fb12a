//! Raw, string-typed settings as they arrive from the layered sources.
//!
//! Field names are the lower-cased environment variable names so that the
//! figment providers and this struct agree on keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Variables the resolver reads. `SRID_<NAME>` variables are matched by prefix.
pub const RECOGNIZED_VARS: &[&str] = &[
    "APP_ENV",
    "SECRET_KEY",
    "DB_HOST",
    "DB_PORT",
    "DB_NAME",
    "DB_USER",
    "DB_PASSWORD",
    "UPLOAD_DIR",
    "MAX_UPLOAD_BYTES",
    "ALLOWED_UPLOAD_EXTENSIONS",
    "DEFAULT_ADMIN_LOGIN",
    "DEFAULT_ADMIN_PASSWORD",
    "APP_DEBUG",
    "APP_TIMEZONE",
    "CORS_ALLOW_ORIGINS",
    "CORS_MAX_AGE",
    "SESSION_LIFETIME",
    "SESSION_SECURE",
    "PAGINATION_DEFAULT_LIMIT",
    "PAGINATION_MAX_LIMIT",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

pub const SRID_PREFIX: &str = "SRID_";

/// Directory name used when `UPLOAD_DIR` is unset, relative to the base directory.
pub const DEFAULT_UPLOAD_DIR_NAME: &str = "uploads";

/// Whether `name` is a variable the resolver consumes. Names are case-sensitive.
pub fn is_recognized(name: &str) -> bool {
    if RECOGNIZED_VARS.contains(&name) {
        return true;
    }
    name.strip_prefix(SRID_PREFIX).is_some_and(|suffix| {
        !suffix.is_empty()
            && suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct RawSettings {
    #[serde(default = "default_app_env")]
    pub app_env: String,

    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_db_port")]
    pub db_port: String,

    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default = "default_db_user")]
    pub db_user: String,

    #[serde(default)]
    pub db_password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<String>,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: String,

    #[serde(default = "default_allowed_upload_extensions")]
    pub allowed_upload_extensions: String,

    #[serde(default = "default_admin_login")]
    pub default_admin_login: String,

    #[serde(default = "default_secret_key")]
    pub default_admin_password: String,

    #[serde(default = "default_false")]
    pub app_debug: String,

    #[serde(default = "default_timezone")]
    pub app_timezone: String,

    #[serde(default = "default_cors_allow_origins")]
    pub cors_allow_origins: String,

    #[serde(default = "default_one_day_secs")]
    pub cors_max_age: String,

    #[serde(default = "default_one_day_secs")]
    pub session_lifetime: String,

    #[serde(default = "default_true")]
    pub session_secure: String,

    #[serde(default = "default_pagination_default_limit")]
    pub pagination_default_limit: String,

    #[serde(default = "default_pagination_max_limit")]
    pub pagination_max_limit: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// `srid_<name>` keys
    #[serde(flatten)]
    pub spatial_reference_ids: BTreeMap<String, String>,
}

fn default_app_env() -> String {
    "development".to_string()
}

/// Placeholder shipped for every secret; refused in production.
fn default_secret_key() -> String {
    "CHANGE_ME".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> String {
    "5432".to_string()
}

fn default_db_name() -> String {
    "lksoftgwebsrv".to_string()
}

fn default_db_user() -> String {
    "lksoftgwebsrv".to_string()
}

fn default_max_upload_bytes() -> String {
    (16 * 1024 * 1024).to_string()
}

fn default_allowed_upload_extensions() -> String {
    "png,jpg,jpeg,gif,webp".to_string()
}

fn default_admin_login() -> String {
    "root".to_string()
}

fn default_false() -> String {
    "false".to_string()
}

fn default_true() -> String {
    "true".to_string()
}

fn default_timezone() -> String {
    "Asia/Yekaterinburg".to_string()
}

fn default_cors_allow_origins() -> String {
    "*".to_string()
}

fn default_one_day_secs() -> String {
    "86400".to_string()
}

fn default_pagination_default_limit() -> String {
    "50".to_string()
}

fn default_pagination_max_limit() -> String {
    "1000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_spatial_reference_ids() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("srid_wgs84".to_string(), "4326".to_string()),
        // MSK-86 zone 4; the code is carried as configured, not verified.
        ("srid_msk86_zone4".to_string(), "2502".to_string()),
    ])
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            app_env: default_app_env(),
            secret_key: default_secret_key(),
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_name: default_db_name(),
            db_user: default_db_user(),
            db_password: String::new(),
            upload_dir: None,
            max_upload_bytes: default_max_upload_bytes(),
            allowed_upload_extensions: default_allowed_upload_extensions(),
            default_admin_login: default_admin_login(),
            default_admin_password: default_secret_key(),
            app_debug: default_false(),
            app_timezone: default_timezone(),
            cors_allow_origins: default_cors_allow_origins(),
            cors_max_age: default_one_day_secs(),
            session_lifetime: default_one_day_secs(),
            session_secure: default_true(),
            pagination_default_limit: default_pagination_default_limit(),
            pagination_max_limit: default_pagination_max_limit(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            spatial_reference_ids: default_spatial_reference_ids(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_names_are_case_sensitive() {
        assert!(is_recognized("DB_HOST"));
        assert!(!is_recognized("db_host"));
        assert!(!is_recognized("PATH"));
    }

    #[test]
    fn test_srid_prefix_matching() {
        assert!(is_recognized("SRID_WGS84"));
        assert!(is_recognized("SRID_MSK86_ZONE4"));
        assert!(!is_recognized("SRID_"));
        assert!(!is_recognized("SRID_wgs84"));
        assert!(!is_recognized("SRID_WGS-84"));
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let raw = RawSettings::default();
        assert_eq!(raw.secret_key, "CHANGE_ME");
        assert_eq!(raw.default_admin_password, "CHANGE_ME");
        assert_eq!(raw.db_port, "5432");
        assert_eq!(raw.max_upload_bytes, "16777216");
        assert!(raw.db_password.is_empty());
        assert!(raw.upload_dir.is_none());
        assert_eq!(raw.spatial_reference_ids.len(), 2);
    }
}
