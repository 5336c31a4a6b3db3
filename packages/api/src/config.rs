//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file,
//! then environment variables. The CLI applies its own flags last.
//!
//! ```toml
//! base_url = "https://crime-data-explorer.example.gov"
//! proxy_path = "/api-proxy"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const BASE_URL_ENV: &str = "CRIME_EXPLORER_API_URL";

/// Environment variable overriding [`ApiConfig::proxy_path`].
pub const PROXY_PATH_ENV: &str = "CRIME_EXPLORER_PROXY_PATH";

/// Where and how to reach the explorer API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the API server.
    pub base_url: String,
    /// Proxy path every endpoint lives under.
    pub proxy_path: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6005".to_string(),
            proxy_path: "/api-proxy".to_string(),
            user_agent: concat!("crime-explorer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the document is not valid TOML or
    /// has wrongly-typed values.
    pub fn from_toml_str(contents: &str) -> Result<Self, ApiError> {
        toml::de::from_str(contents).map_err(|e| ApiError::Config {
            message: format!("Failed to parse API config: {e}"),
        })
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ApiError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies [`BASE_URL_ENV`] and [`PROXY_PATH_ENV`] when set and
    /// non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(base_url) = non_empty_env(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(proxy_path) = non_empty_env(PROXY_PATH_ENV) {
            self.proxy_path = proxy_path;
        }
        self
    }

    /// Builds the absolute URL for a proxy-relative path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let proxy = self.proxy_path.trim_matches('/');
        let path = path.trim_start_matches('/');
        if proxy.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{proxy}/{path}")
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_segments() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("api/estimates/national"),
            "http://localhost:6005/api-proxy/api/estimates/national"
        );
    }

    #[test]
    fn endpoint_tolerates_stray_slashes() {
        let config = ApiConfig {
            base_url: "https://example.org/".to_string(),
            proxy_path: "/api-proxy/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(
            config.endpoint("/leoka/x"),
            "https://example.org/api-proxy/leoka/x"
        );
    }

    #[test]
    fn endpoint_without_proxy() {
        let config = ApiConfig {
            proxy_path: String::new(),
            ..ApiConfig::default()
        };
        assert_eq!(config.endpoint("api/x"), "http://localhost:6005/api/x");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = ApiConfig::from_toml_str("base_url = \"https://cde.example.gov\"\n").unwrap();
        assert_eq!(config.base_url, "https://cde.example.gov");
        assert_eq!(config.proxy_path, "/api-proxy");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ApiConfig::from_toml_str("base_url = 5").unwrap_err();
        assert!(matches!(err, ApiError::Config { .. }));
    }
}
