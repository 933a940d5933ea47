//! Console configuration loaded from the environment
//!
//! `main` loads `.env` first, so every key can live there:
//!
//! - `CAISSE_API_URL` (required): backend API root, e.g. `http://localhost:8000/api`
//! - `CAISSE_API_TOKEN`: token sent as `Authorization: Token <token>`
//! - `CAISSE_HTTP_TIMEOUT_SECS`: per-request timeout, default 30
//! - `CAISSE_NOTIFICATION_TIMEOUT_MS`: how long notifications stay visible, default 3000

use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    pub notification_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CAISSE_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("CAISSE_API_URL"))?;

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "CAISSE_API_URL",
                message: format!("'{}' is not an http(s) URL", api_url),
            });
        }

        let api_token = lookup("CAISSE_API_TOKEN").filter(|v| !v.trim().is_empty());

        let http_timeout =
            Duration::from_secs(parse_or(&lookup, "CAISSE_HTTP_TIMEOUT_SECS", 30)?);
        let notification_timeout =
            Duration::from_millis(parse_or(&lookup, "CAISSE_NOTIFICATION_TIMEOUT_MS", 3000)?);

        Ok(Config {
            api_url,
            api_token,
            http_timeout,
            notification_timeout,
        })
    }
}

fn parse_or<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            key,
            message: format!("'{}': {}", raw, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config =
            Config::from_lookup(lookup_from(&[("CAISSE_API_URL", "http://localhost:8000/api")]))
                .unwrap();

        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.api_token, None);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.notification_timeout, Duration::from_millis(3000));
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("CAISSE_API_URL", "https://pos.example/api/"),
            ("CAISSE_API_TOKEN", "abc123"),
            ("CAISSE_HTTP_TIMEOUT_SECS", "5"),
            ("CAISSE_NOTIFICATION_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.api_token.as_deref(), Some("abc123"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.notification_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn url_is_trimmed_before_the_scheme_check() {
        let config =
            Config::from_lookup(lookup_from(&[("CAISSE_API_URL", "  http://pos.local/api \n")]))
                .unwrap();
        assert_eq!(config.api_url, "http://pos.local/api");
    }

    #[test]
    fn missing_url_is_an_error() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("CAISSE_API_URL"))
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = Config::from_lookup(lookup_from(&[
            ("CAISSE_API_URL", "http://localhost"),
            ("CAISSE_HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CAISSE_HTTP_TIMEOUT_SECS", .. }));

        let err =
            Config::from_lookup(lookup_from(&[("CAISSE_API_URL", "localhost:8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CAISSE_API_URL", .. }));
    }
}
