use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Connection settings for the hosted product table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_order_column")]
    pub order_column: String,
    /// Name of the environment variable holding the API key.
    pub env_api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    // Loaded from the environment, never from the file
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_table() -> String {
    "product_skus".to_string()
}

fn default_order_column() -> String {
    "capacity_kw".to_string()
}

impl StoreConfig {
    pub fn load_credentials(&mut self) -> Result<()> {
        let key_var = self.api_key_var().to_string();

        self.api_key = env::var(&key_var)
            .with_context(|| format!("Missing environment variable: {}", key_var))?
            .into();

        Ok(())
    }

    pub fn api_key_var(&self) -> &str {
        self.env_api_key.as_deref().unwrap_or("SUPABASE_ANON_KEY")
    }

    pub fn get_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Catalog store API key not loaded"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// `GET` URL for an ordered full-table read.
    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order={}.asc",
            self.base_url.trim_end_matches('/'),
            self.table,
            self.order_column
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow::anyhow!("Catalog store base_url cannot be empty"));
        }

        if self.table.is_empty() {
            return Err(anyhow::anyhow!("Catalog store table cannot be empty"));
        }

        if self.api_key.is_none() {
            return Err(anyhow::anyhow!("Catalog store API key not loaded"));
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            table: default_table(),
            order_column: default_order_column(),
            env_api_key: None,
            timeout_seconds: None,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.table, "product_skus");
        assert_eq!(config.api_key_var(), "SUPABASE_ANON_KEY");
        assert!(config.timeout().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_table_url_orders_by_capacity() {
        let mut config = StoreConfig::default();
        config.base_url = "https://abc.supabase.co/".to_string();
        assert_eq!(
            config.table_url(),
            "https://abc.supabase.co/rest/v1/product_skus?select=*&order=capacity_kw.asc"
        );
    }

    #[test]
    fn test_credentials_loading() {
        unsafe {
            env::set_var("TEST_CATALOG_STORE_KEY", "anon-key");
        }

        let mut config = StoreConfig::default();
        config.env_api_key = Some("TEST_CATALOG_STORE_KEY".to_string());

        assert!(config.load_credentials().is_ok());
        assert_eq!(config.get_api_key().unwrap(), "anon-key");
        assert!(config.validate().is_ok());

        unsafe {
            env::remove_var("TEST_CATALOG_STORE_KEY");
        }
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = StoreConfig::default();
        config.env_api_key = Some("TEST_CATALOG_STORE_KEY_UNSET".to_string());
        let err = config.load_credentials().unwrap_err();
        assert!(err.to_string().contains("TEST_CATALOG_STORE_KEY_UNSET"));
    }
}
