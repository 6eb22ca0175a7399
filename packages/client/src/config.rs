//! Client configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `FLOOD_API_BASE` | `http://127.0.0.1:8000` | Service origin |
//! | `FLOOD_HISTORY_LIMIT` | unset | History page size, 1-30 |
//! | `FLOOD_REQUEST_TIMEOUT_SECS` | `30` | Per-request timeout |

use std::time::Duration;

use thiserror::Error;

/// Service origin used when `FLOOD_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Per-request timeout used when `FLOOD_REQUEST_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest history page the service accepts.
pub const MAX_HISTORY_LIMIT: u32 = 30;

/// Errors from building client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting had an unusable value.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// Setting name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Where and how to reach the assessment service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service origin without a trailing slash.
    pub api_base: String,
    /// History page size; `None` lets the service choose.
    pub history_limit: Option<u32>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            history_limit: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base) = lookup("FLOOD_API_BASE") {
            config = config.with_api_base(&base)?;
        }
        if let Some(limit) = lookup("FLOOD_HISTORY_LIMIT") {
            let limit: u32 = limit.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: "FLOOD_HISTORY_LIMIT",
                message: format!("{e}"),
            })?;
            config = config.with_history_limit(limit)?;
        }
        if let Some(secs) = lookup("FLOOD_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: "FLOOD_REQUEST_TIMEOUT_SECS",
                message: format!("{e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "FLOOD_REQUEST_TIMEOUT_SECS",
                    message: "must be at least 1".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replaces the service origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless `base` is an
    /// `http://` or `https://` URL.
    pub fn with_api_base(mut self, base: &str) -> Result<Self, ConfigError> {
        let base = base.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: "FLOOD_API_BASE",
                message: format!("'{base}' is not an http(s) URL"),
            });
        }
        self.api_base = base.to_string();
        Ok(self)
    }

    /// Sets the history page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless `limit` is in
    /// `1..=30`.
    pub fn with_history_limit(mut self, limit: u32) -> Result<Self, ConfigError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidValue {
                name: "FLOOD_HISTORY_LIMIT",
                message: format!("{limit} is outside 1..={MAX_HISTORY_LIMIT}"),
            });
        }
        self.history_limit = Some(limit);
        Ok(self)
    }

    /// URL of the assessment endpoint.
    #[must_use]
    pub fn assess_url(&self) -> String {
        format!("{}/assess", self.api_base)
    }

    /// URL of the history endpoint.
    #[must_use]
    pub fn history_url(&self) -> String {
        format!("{}/history", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.assess_url(), "http://127.0.0.1:8000/assess");
        assert_eq!(config.history_url(), "http://127.0.0.1:8000/history");
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FLOOD_API_BASE", "https://flood.example.org/"),
            ("FLOOD_HISTORY_LIMIT", "15"),
            ("FLOOD_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://flood.example.org");
        assert_eq!(config.history_limit, Some(15));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_non_http_base() {
        let err = ClientConfig::from_lookup(lookup(&[("FLOOD_API_BASE", "file:///tmp")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "FLOOD_API_BASE",
                ..
            }
        ));
    }

    #[test]
    fn rejects_history_limit_out_of_range() {
        for bad in ["0", "31", "ten"] {
            let result = ClientConfig::from_lookup(lookup(&[("FLOOD_HISTORY_LIMIT", bad)]));
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(
            ClientConfig::from_lookup(lookup(&[("FLOOD_REQUEST_TIMEOUT_SECS", "0")])).is_err()
        );
    }
}
