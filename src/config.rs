//! Client configuration.
//!
//! The API origin is fixed when the crate is compiled: set
//! `STOREFRONT_API_BASE_URL` at build time to point the default
//! configuration somewhere other than the local development server.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_client::ClientConfig;
//!
//! let config = ClientConfig::default().with_timeout(Duration::from_secs(10));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::ClientError;

/// API base used when no build-time override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Storage key the bearer token is persisted under.
pub const DEFAULT_TOKEN_KEY: &str = "access_token";

fn build_time_base_url() -> &'static str {
    option_env!("STOREFRONT_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL)
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute API base, e.g. `http://localhost:8000/api/v1`. No trailing slash.
    pub base_url: String,

    /// Key the token is stored under in the [`TokenStore`](crate::TokenStore).
    pub token_key: String,

    /// Location marker of the privileged admin page.
    ///
    /// A 401 received while the navigator is on a location containing this
    /// marker forces navigation to [`entry_page`](Self::entry_page).
    pub admin_page: String,

    /// Public entry page.
    pub entry_page: String,

    /// Transport-level timeout for a single request.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: build_time_base_url().trim_end_matches('/').to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            admin_page: "admin.html".to_owned(),
            entry_page: "index.html".to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a locally running backend with a generous timeout.
    pub fn development() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(120),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    #[must_use]
    pub fn with_pages(mut self, admin_page: impl Into<String>, entry_page: impl Into<String>) -> Self {
        self.admin_page = admin_page.into();
        self.entry_page = entry_page.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "base_url must be an absolute http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.token_key.is_empty()
            || !self
                .token_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ClientError::Configuration(
                "token_key must be a non-empty identifier".to_owned(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Configuration(
                "timeout must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.token_key, "access_token");
        assert_eq!(config.admin_page, "admin.html");
        assert_eq!(config.entry_page, "index.html");
        assert!(!config.base_url.ends_with('/'));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_base_url("https://shop.example.com/api/v1/");
        assert_eq!(config.base_url, "https://shop.example.com/api/v1");
        assert_eq!(
            config.url("/products"),
            "https://shop.example.com/api/v1/products"
        );
    }

    #[test]
    fn test_validate_rejects_relative_base() {
        let config = ClientConfig::default().with_base_url("/api/v1");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_path_like_token_key() {
        let config = ClientConfig::default().with_token_key("../token");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
