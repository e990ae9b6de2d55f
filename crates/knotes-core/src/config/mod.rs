//! Client configuration.
//!
//! Resolved from environment variables so every knotes client (CLI, tests,
//! embedders) discovers the note store the same way.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::sync::{SyncOptions, DEFAULT_DEBOUNCE};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

const SERVER_URL_VAR: &str = "KNOTES_SERVER_URL";
const DEBOUNCE_VAR: &str = "KNOTES_AUTOSAVE_DEBOUNCE_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Note store root, without a trailing slash
    pub server_url: String,
    pub autosave_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            autosave_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = normalize_text_option(lookup(SERVER_URL_VAR))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url = validate_server_url(&server_url)?;

        let debounce_ms = match normalize_text_option(lookup(DEBOUNCE_VAR)) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{DEBOUNCE_VAR} must be an integer in [50, 60000]"))
            })?,
            None => 1_000,
        };
        if !(50..=60_000).contains(&debounce_ms) {
            return Err(ConfigError::Invalid(format!(
                "{DEBOUNCE_VAR} must be in [50, 60000]"
            )));
        }

        Ok(Self {
            server_url,
            autosave_debounce: Duration::from_millis(debounce_ms),
        })
    }

    /// Override the server URL, e.g. from a command-line flag
    pub fn with_server_url(mut self, server_url: &str) -> Result<Self, ConfigError> {
        self.server_url = validate_server_url(server_url)?;
        Ok(self)
    }

    pub const fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            debounce: self.autosave_debounce,
        }
    }
}

fn validate_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !is_http_url(trimmed) {
        return Err(ConfigError::Invalid(format!(
            "{SERVER_URL_VAR} must start with http:// or https://"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
