//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use freshcart_commerce::cart::{FeeSchedule, DELIVERY_FEE, FREE_DELIVERY_THRESHOLD};
use freshcart_storefront::{StorefrontConfig, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["freshcart.toml", ".freshcart.toml", "freshcart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Delivery fee rules used for quotes.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Where the cart and credentials are kept.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Client settings, with `FRESHCART_API_URL` applied.
    pub fn storefront(&self) -> StorefrontConfig {
        StorefrontConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            fees: self.pricing.fee_schedule(),
        }
        .with_env_override()
    }
}

/// API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Delivery fee settings, in rupiah.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: i64,

    /// Subtotal at which delivery becomes free.
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: i64,
}

fn default_delivery_fee() -> i64 {
    DELIVERY_FEE
}

fn default_free_delivery_threshold() -> i64 {
    FREE_DELIVERY_THRESHOLD
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_fee: default_delivery_fee(),
            free_delivery_threshold: default_free_delivery_threshold(),
        }
    }
}

impl PricingConfig {
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule::new(self.delivery_fee, self.free_delivery_threshold)
    }
}

/// Session storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session directory (default: ~/.local/share/freshcart/session).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Generate a default freshcart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# FreshCart CLI configuration

[api]
base_url = "{base_url}"
timeout_secs = 30

[pricing]
# Amounts in rupiah
delivery_fee = {delivery_fee}
free_delivery_threshold = {threshold}

[session]
# dir = "~/.local/share/freshcart/session"

[logging]
# compact or json
format = "compact"
"#,
        base_url = DEFAULT_API_URL,
        delivery_fee = DELIVERY_FEE,
        threshold = FREE_DELIVERY_THRESHOLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.pricing.fee_schedule(), FeeSchedule::default());
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.pricing.delivery_fee, 10_000);
        assert_eq!(config.pricing.free_delivery_threshold, 100_000);
        assert!(config.session.dir.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
            [pricing]
            delivery_fee = 15000

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.delivery_fee, 15_000);
        assert_eq!(config.pricing.free_delivery_threshold, 100_000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freshcart.json");
        std::fs::write(&path, r#"{"api": {"timeout_secs": 5}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freshcart.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_storefront_settings() {
        let mut config = CliConfig::default();
        config.api.timeout_secs = 5;
        config.pricing.delivery_fee = 12_000;

        let storefront = config.storefront();
        assert_eq!(storefront.timeout, Duration::from_secs(5));
        assert_eq!(storefront.fees, FeeSchedule::new(12_000, 100_000));
    }
}
