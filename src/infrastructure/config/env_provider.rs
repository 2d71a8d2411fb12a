use std::collections::{BTreeMap, BTreeSet};

use figment::value::{Dict, Map, Value};
use figment::{Metadata, Profile, Provider};

use super::settings::is_recognized;

/// Figment provider over an explicit set of environment variables.
///
/// Only recognized names are kept, and a value that is empty or whitespace
/// counts as unset. Blank names are remembered so a lower layer can be told
/// to fall back to the default as well. Values stay strings; typing happens in
/// the resolver where errors can name the variable.
#[derive(Debug, Clone)]
pub struct EnvMap {
    name: String,
    vars: BTreeMap<String, String>,
    blank: BTreeSet<String>,
}

impl EnvMap {
    pub fn from_vars<I, K, V>(name: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = BTreeMap::new();
        let mut blank = BTreeSet::new();
        for (key, value) in vars.into_iter().map(|(k, v)| (k.into(), v.into())) {
            if !is_recognized(&key) {
                continue;
            }
            if value.trim().is_empty() {
                set.remove(&key);
                blank.insert(key);
            } else {
                blank.remove(&key);
                set.insert(key, value);
            }
        }
        Self {
            name: name.into(),
            vars: set,
            blank,
        }
    }

    /// Variables of the current process. Entries that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars("process environment", vars)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Recognized names that were present with an empty or whitespace value.
    pub fn blank_names(&self) -> impl Iterator<Item = &str> {
        self.blank.iter().map(String::as_str)
    }

    /// Drop `names` from this layer.
    #[must_use]
    pub fn without<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            self.vars.remove(name);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Provider for EnvMap {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let dict: Dict = self
            .vars
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), Value::from(v.clone())))
            .collect();
        Ok(Profile::Default.collect(dict))
    }
}

#[cfg(test)]
mod tests {
    use figment::Figment;

    use super::*;

    #[test]
    fn test_unrecognized_and_blank_values_are_dropped() {
        let env = EnvMap::from_vars(
            "test",
            [("DB_HOST", "db1"), ("PATH", "/usr/bin"), ("DB_NAME", "   ")],
        );
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("DB_HOST"), Some("db1"));
        assert_eq!(env.get("DB_NAME"), None);
        assert_eq!(env.blank_names().collect::<Vec<_>>(), vec!["DB_NAME"]);
    }

    #[test]
    fn test_later_entry_wins_between_blank_and_set() {
        let env = EnvMap::from_vars("test", [("DB_HOST", "db1"), ("DB_HOST", " ")]);
        assert_eq!(env.get("DB_HOST"), None);
        assert_eq!(env.blank_names().count(), 1);

        let env = EnvMap::from_vars("test", [("DB_HOST", ""), ("DB_HOST", "db2")]);
        assert_eq!(env.get("DB_HOST"), Some("db2"));
        assert_eq!(env.blank_names().count(), 0);
    }

    #[test]
    fn test_without_drops_named_vars() {
        let file = EnvMap::from_vars("file", [("DB_HOST", "from-file"), ("DB_NAME", "geo")]);
        let env = EnvMap::from_vars("env", [("DB_HOST", "")]);
        let file = file.without(env.blank_names());
        assert_eq!(file.get("DB_HOST"), None);
        assert_eq!(file.get("DB_NAME"), Some("geo"));
    }

    #[test]
    fn test_values_stay_strings() {
        let env = EnvMap::from_vars("test", [("DB_PORT", "5433"), ("APP_DEBUG", "true")]);
        let figment = Figment::from(env);
        assert_eq!(figment.extract_inner::<String>("db_port").unwrap(), "5433");
        assert_eq!(figment.extract_inner::<String>("app_debug").unwrap(), "true");
    }

    #[test]
    fn test_metadata_names_the_source() {
        let env = EnvMap::from_vars("dotenv file .env", [("DB_HOST", "db1")]);
        let figment = Figment::from(env);
        let metadata = figment.find_metadata("db_host").unwrap();
        assert_eq!(metadata.name, "dotenv file .env");
    }
}
