use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    /// Local hour (0-23) at which empty notes are purged
    pub cleanup_hour: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "KNOTES_API_BIND_ADDR", "127.0.0.1:8080");

        let db_path = optional_trimmed(&lookup, "KNOTES_DB_PATH")
            .map_or_else(default_db_path, PathBuf::from);

        let cleanup_hour = value_or_default(&lookup, "KNOTES_CLEANUP_HOUR", "2")
            .parse::<u32>()
            .map_err(|_| {
                ConfigError::Invalid("KNOTES_CLEANUP_HOUR must be an integer in [0, 23]".to_string())
            })?;
        if cleanup_hour > 23 {
            return Err(ConfigError::Invalid(
                "KNOTES_CLEANUP_HOUR must be in [0, 23]".to_string(),
            ));
        }

        Ok(Self {
            bind_addr,
            db_path,
            cleanup_hour,
        })
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("knotes.db"),
        |dir| dir.join("knotes").join("knotes.db"),
    )
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn config_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.cleanup_hour, 2);
        assert!(config.db_path.ends_with("knotes.db"));
    }

    #[test]
    fn config_reads_overrides() {
        let config = config_from(&[
            ("KNOTES_API_BIND_ADDR", "0.0.0.0:9000"),
            ("KNOTES_DB_PATH", "/tmp/knotes-test.db"),
            ("KNOTES_CLEANUP_HOUR", "23"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/knotes-test.db"));
        assert_eq!(config.cleanup_hour, 23);
    }

    #[test]
    fn config_rejects_invalid_cleanup_hour() {
        let err = config_from(&[("KNOTES_CLEANUP_HOUR", "24")]).unwrap_err();
        assert!(err.to_string().contains("KNOTES_CLEANUP_HOUR"));
        assert!(config_from(&[("KNOTES_CLEANUP_HOUR", "two")]).is_err());
    }
}
