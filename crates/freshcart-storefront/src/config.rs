//! Client configuration.

use freshcart_commerce::cart::FeeSchedule;
use freshcart_data::FetchClient;
use std::time::Duration;

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "FRESHCART_API_URL";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// How to reach the API and which fee rules to quote with.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub fees: FeeSchedule,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: freshcart_data::DEFAULT_TIMEOUT,
            fees: FeeSchedule::default(),
        }
    }
}

impl StorefrontConfig {
    /// Replace the base URL with `FRESHCART_API_URL` when it is set.
    pub fn with_env_override(self) -> Self {
        let env = std::env::var(API_URL_ENV).ok();
        self.with_base_url_override(env)
    }

    fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Build an HTTP client for this configuration.
    pub fn client(&self) -> FetchClient {
        FetchClient::new()
            .with_base_url(self.base_url.clone())
            .with_default_header("Accept", "application/json")
            .with_timeout(self.timeout)
    }
}
