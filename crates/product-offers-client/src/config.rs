//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `PRODUCT_OFFERS_*` environment variables. Front ends apply their own flags
//! last.
//!
//! ```toml
//! endpoint = "http://localhost:8080/graphql"
//! timeout_ms = 10000
//! log_filter = "info"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "product-offers.toml";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENDPOINT_VAR: &str = "PRODUCT_OFFERS_ENDPOINT";
pub const TIMEOUT_VAR: &str = "PRODUCT_OFFERS_TIMEOUT_MS";
pub const LOG_VAR: &str = "PRODUCT_OFFERS_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint every operation is posted to
    pub endpoint: Url,
    /// Whole-request timeout
    pub timeout: Duration,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
    log_filter: Option<String>,
}

impl ClientConfig {
    /// Defaults overlaid by the file at `path` (or [`DEFAULT_CONFIG_FILE`] if
    /// it exists) and by the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        if let Some(path) = path {
            config = config.merge_file(&path)?;
        }

        config.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay the values of a TOML file
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge(file)
    }

    fn merge(mut self, file: FileConfig) -> Result<Self, ConfigError> {
        if let Some(timeout_ms) = file.timeout_ms {
            self.timeout = timeout(timeout_ms, || timeout_ms.to_string())?;
        }
        if let Some(log_filter) = file.log_filter {
            self.log_filter = log_filter;
        }
        match file.endpoint {
            Some(endpoint) => self.with_endpoint(&endpoint),
            None => Ok(self),
        }
    }

    /// Overlay variables read through `lookup`; unset or empty variables are
    /// ignored
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(endpoint) = var(ENDPOINT_VAR) {
            self = self.with_endpoint(&endpoint)?;
        }
        if let Some(timeout) = var(TIMEOUT_VAR) {
            self = self.with_timeout_ms(&timeout)?;
        }
        if let Some(log_filter) = var(LOG_VAR) {
            self.log_filter = log_filter;
        }
        Ok(self)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = Url::parse(endpoint.trim()).map_err(|source| ConfigError::Endpoint {
            value: endpoint.to_string(),
            source,
        })?;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: &str) -> Result<Self, ConfigError> {
        let millis: u64 = timeout_ms
            .trim()
            .parse()
            .map_err(|_| ConfigError::Timeout(timeout_ms.to_string()))?;
        self.timeout = timeout(millis, || timeout_ms.to_string())?;
        Ok(self)
    }
}

/// Timeouts must be at least one millisecond
fn timeout(millis: u64, raw: impl FnOnce() -> String) -> Result<Duration, ConfigError> {
    match millis {
        0 => Err(ConfigError::Timeout(raw())),
        _ => Ok(Duration::from_millis(millis)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn file(raw: &str) -> FileConfig {
        toml::from_str(raw).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/graphql");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_toml_overlay() {
        let config = ClientConfig::default()
            .merge(file("endpoint = \"http://api.test/graphql\"\ntimeout_ms = 250\n"))
            .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://api.test/graphql");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(toml::from_str::<FileConfig>("endpiont = \"x\"").is_err());
    }

    #[test]
    fn test_environment_wins_over_file() {
        let config = ClientConfig::default()
            .merge(file("endpoint = \"http://file.test/graphql\""))
            .unwrap()
            .apply_overrides(env(&[
                (ENDPOINT_VAR, "http://env.test/graphql"),
                (TIMEOUT_VAR, "1500"),
                (LOG_VAR, "debug"),
            ]))
            .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://env.test/graphql");
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_empty_variables_are_ignored() {
        let config = ClientConfig::default()
            .apply_overrides(env(&[(ENDPOINT_VAR, " ")]))
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let error = ClientConfig::default()
            .apply_overrides(env(&[(ENDPOINT_VAR, "not a url")]))
            .unwrap_err();
        assert!(matches!(error, ConfigError::Endpoint { .. }));

        let error = ClientConfig::default()
            .apply_overrides(env(&[(TIMEOUT_VAR, "ten")]))
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid timeout ten, expected milliseconds");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let error = ClientConfig::default()
            .apply_overrides(env(&[(TIMEOUT_VAR, "0")]))
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid timeout 0, expected milliseconds");

        let error = ClientConfig::default().merge(file("timeout_ms = 0\n")).unwrap_err();
        assert!(matches!(error, ConfigError::Timeout(raw) if raw == "0"));
    }

    #[test]
    fn test_missing_file() {
        let error = ClientConfig::load(Some(Path::new("/nonexistent/product-offers.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }
}
