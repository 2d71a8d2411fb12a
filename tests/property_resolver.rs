use geoweb_config::{ConfigError, ConfigResolver, EnvironmentMode};
use percent_encoding::percent_decode_str;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use tempfile::TempDir;
use url::Url;

fn percent_decode(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the connection URL always decodes back to the configured parts
    ///
    /// Credentials may contain any printable ASCII, including URL-reserved
    /// characters and `%`, without leaking into host, port or path.
    #[test]
    fn prop_database_url_is_escaped_composition(
        host in "[a-z][a-z0-9-]{0,12}",
        port in 1u16..=65535,
        name in "[a-z_][a-z0-9_]{0,12}",
        user in "[!-~][ -~]{0,15}",
        password in "[!-~][ -~]{0,23}",
    ) {
        let dir = TempDir::new().unwrap();
        let port_text = port.to_string();
        let snapshot = ConfigResolver::new()
            .with_base_dir(dir.path())
            .resolve([
                ("DB_HOST", host.as_str()),
                ("DB_PORT", port_text.as_str()),
                ("DB_NAME", name.as_str()),
                ("DB_USER", user.as_str()),
                ("DB_PASSWORD", password.as_str()),
            ])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let url = Url::parse(snapshot.database_url())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(url.scheme(), "postgresql");
        prop_assert_eq!(url.host_str(), Some(host.as_str()));
        prop_assert_eq!(url.port(), Some(port));
        prop_assert_eq!(url.path(), format!("/{name}"));
        prop_assert_eq!(percent_decode(url.username()), user);
        prop_assert_eq!(url.password().map(percent_decode), Some(password));
    }

    /// Property: resolving the same environment twice yields equal snapshots
    #[test]
    fn prop_resolution_is_idempotent(
        host in "[a-z][a-z0-9.-]{0,12}",
        max_bytes in 1u64..=u64::from(u32::MAX),
        extensions in prop::collection::vec("[A-Za-z]{1,5}", 1..5),
    ) {
        let dir = TempDir::new().unwrap();
        let vars = vec![
            ("DB_HOST".to_string(), host),
            ("MAX_UPLOAD_BYTES".to_string(), max_bytes.to_string()),
            ("ALLOWED_UPLOAD_EXTENSIONS".to_string(), extensions.join(",")),
        ];
        let resolver = ConfigResolver::new().with_base_dir(dir.path());

        let first = resolver.resolve(vars.clone()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = resolver.resolve(vars).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.max_upload_bytes(), max_bytes);
        prop_assert!(first
            .allowed_upload_extensions()
            .iter()
            .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase())));
    }

    /// Property: any DB_PORT that is not an unsigned integer is an InvalidType error
    #[test]
    fn prop_non_numeric_port_is_invalid_type(port in "[0-9]{0,3}[a-zA-Z.:/-][0-9a-z]{0,3}") {
        let dir = TempDir::new().unwrap();
        let result = ConfigResolver::new()
            .with_base_dir(dir.path())
            .resolve([("DB_PORT", port.as_str())]);
        prop_assert!(matches!(result, Err(ConfigError::InvalidType { .. })), "{:?}", result);
    }

    /// Property: secrets that are not placeholders pass the production guard
    #[test]
    fn prop_real_secrets_pass_production_guard(
        secret in "[A-Za-z0-9]{16,32}",
        db_password in "[A-Za-z0-9@:/]{12,24}",
        admin_password in "[A-Za-z0-9]{12,24}",
    ) {
        let dir = TempDir::new().unwrap();
        let result = ConfigResolver::new()
            .with_base_dir(dir.path())
            .with_mode(EnvironmentMode::Production)
            .resolve([
                ("SECRET_KEY", secret.as_str()),
                ("DB_PASSWORD", db_password.as_str()),
                ("DEFAULT_ADMIN_PASSWORD", admin_password.as_str()),
            ]);
        prop_assert!(result.is_ok(), "{:?}", result.err());
    }
}
