use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default artwork service deployment.
pub const DEFAULT_API_URL: &str = "https://art-api.sendiko.my.id";

/// Default location of the persisted identity triple.
pub const DEFAULT_IDENTITY_FILE: &str = "artboard-identity.json";

/// Host configuration for the sync layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Base URL of the artwork service.
    pub api_url: String,
    /// Per-request timeout. `None` leaves the transport default (no
    /// timeout), so a service that never answers keeps the status at
    /// `Loading`.
    pub request_timeout: Option<Duration>,
    /// File holding the persisted identity.
    pub identity_file: PathBuf,
    /// Drop refresh responses that complete after a newer refresh was
    /// issued. Off by default: the last response to arrive wins.
    pub discard_stale_refresh: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            identity_file: PathBuf::from(DEFAULT_IDENTITY_FILE),
            discard_stale_refresh: false,
        }
    }
}

impl SyncConfig {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// | Env Var                          | Default                         |
    /// |----------------------------------|---------------------------------|
    /// | `ARTBOARD_API_URL`               | `https://art-api.sendiko.my.id` |
    /// | `ARTBOARD_REQUEST_TIMEOUT_SECS`  | unset                           |
    /// | `ARTBOARD_IDENTITY_FILE`         | `artboard-identity.json`        |
    /// | `ARTBOARD_DISCARD_STALE_REFRESH` | `false`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("ARTBOARD_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let request_timeout = match lookup("ARTBOARD_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "ARTBOARD_REQUEST_TIMEOUT_SECS",
                    expected: "a positive integer",
                    value: value.clone(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "ARTBOARD_REQUEST_TIMEOUT_SECS",
                        expected: "a positive integer",
                        value,
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let identity_file = lookup("ARTBOARD_IDENTITY_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.identity_file);

        let discard_stale_refresh = match lookup("ARTBOARD_DISCARD_STALE_REFRESH") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                var: "ARTBOARD_DISCARD_STALE_REFRESH",
                expected: "a boolean",
                value,
            })?,
            None => defaults.discard_stale_refresh,
        };

        Ok(Self {
            api_url,
            request_timeout,
            identity_file,
            discard_stale_refresh,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<SyncConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SyncConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]).unwrap(), SyncConfig::default());
        assert!(SyncConfig::default().request_timeout.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("ARTBOARD_API_URL", "http://localhost:8080/"),
            ("ARTBOARD_REQUEST_TIMEOUT_SECS", "15"),
            ("ARTBOARD_IDENTITY_FILE", "/tmp/who.json"),
            ("ARTBOARD_DISCARD_STALE_REFRESH", "Yes"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.identity_file, PathBuf::from("/tmp/who.json"));
        assert!(config.discard_stale_refresh);
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = load(&[("ARTBOARD_API_URL", "  ")]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        assert_matches!(
            load(&[("ARTBOARD_REQUEST_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { var: "ARTBOARD_REQUEST_TIMEOUT_SECS", .. })
        );
        assert_matches!(
            load(&[("ARTBOARD_REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { .. })
        );
    }

    #[test]
    fn bad_bool_is_rejected() {
        assert_matches!(
            load(&[("ARTBOARD_DISCARD_STALE_REFRESH", "maybe")]),
            Err(ConfigError::Invalid { var: "ARTBOARD_DISCARD_STALE_REFRESH", .. })
        );
    }
}
