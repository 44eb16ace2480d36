//! Workload configuration.
//!
//! Configuration comes from a TOML document or from a flat key lookup
//! (environment variables natively, Spin variables inside a component).
//! Lookup keys are lowercase snake case; [`GridConfig::from_env`] maps them
//! to `STOREFRONT_`-prefixed uppercase environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable prefix used by [`GridConfig::from_env`].
pub const ENV_PREFIX: &str = "STOREFRONT_";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Connection settings for the hosted product store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Base URL of the store (e.g., "https://xyz.supabase.co").
    pub url: String,
    /// Public (anonymous) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
    /// Table holding product rows.
    #[serde(default = "default_products_table")]
    pub products_table: String,
    /// Table holding review rows.
    #[serde(default = "default_reviews_table")]
    pub reviews_table: String,
}

fn default_products_table() -> String {
    "products".to_string()
}

fn default_reviews_table() -> String {
    "reviews".to_string()
}

impl StoreConfig {
    /// Create a store config with default table names.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            products_table: default_products_table(),
            reviews_table: default_reviews_table(),
        }
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Missing("store_url"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "store_url",
                value: self.url.clone(),
            });
        }
        if self.products_table.is_empty() {
            return Err(ConfigError::Missing("products_table"));
        }
        if self.reviews_table.is_empty() {
            return Err(ConfigError::Missing("reviews_table"));
        }
        Ok(())
    }
}

/// Configuration for the product grid workload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Hosted store connection.
    pub store: StoreConfig,
    /// ISO currency code used to format prices.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Quiet period before a search input settles.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Route prefix for product detail links.
    #[serde(default = "default_detail_route_prefix")]
    pub detail_route_prefix: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_detail_route_prefix() -> String {
    "/product/".to_string()
}

impl GridConfig {
    /// Create a config for the given store with defaults elsewhere.
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            currency: default_currency(),
            debounce_ms: default_debounce_ms(),
            detail_route_prefix: default_detail_route_prefix(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = toml::from_str(content)?;
        config.store.validate()?;
        Ok(config)
    }

    /// Build from a flat key lookup.
    ///
    /// `store_url` is required; every other key falls back to its default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("store_url").ok_or(ConfigError::Missing("store_url"))?;
        let mut store = StoreConfig::new(url, lookup("store_anon_key").unwrap_or_default());
        if let Some(table) = lookup("products_table") {
            store.products_table = table;
        }
        if let Some(table) = lookup("reviews_table") {
            store.reviews_table = table;
        }
        store.validate()?;

        let mut config = GridConfig::new(store);
        if let Some(currency) = lookup("currency") {
            config.currency = currency;
        }
        if let Some(raw) = lookup("debounce_ms") {
            config.debounce_ms = parse_u64("debounce_ms", &raw)?;
        }
        if let Some(prefix) = lookup("detail_route_prefix") {
            config.detail_route_prefix = prefix;
        }
        Ok(config)
    }

    /// Build from `STOREFRONT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(format!("{}{}", ENV_PREFIX, key.to_uppercase())).ok())
    }

    /// Debounce quiet period as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
