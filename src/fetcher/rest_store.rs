use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};
use wreq::{Client, Response};
use wreq_util::Emulation;

use crate::config::StoreConfig;
use crate::error::CatalogError;
use crate::processor::parse_number;

/// Read access to the product table.
///
/// Implementations return every row, ordered by capacity ascending, as raw
/// JSON. Normalization happens in the catalog client.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Value>, CatalogError>;
}

/// PostgREST endpoint of the hosted database.
pub struct RestCatalogStore {
    client: Client,
    config: StoreConfig,
}

impl RestCatalogStore {
    pub fn new(config: StoreConfig) -> Result<Self, CatalogError> {
        config
            .validate()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let mut builder = Client::builder().emulation(Emulation::Firefox136);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(RestCatalogStore { client, config })
    }

    async fn fetch_with_auth(&self, url: &str) -> Result<Response, CatalogError> {
        let api_key = self
            .config
            .get_api_key()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CatalogStore for RestCatalogStore {
    async fn fetch_products(&self) -> Result<Vec<Value>, CatalogError> {
        let url = self.config.table_url();
        info!("Fetching catalog from {}", url);

        let response = self.fetch_with_auth(&url).await?;
        let data: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        let rows = extract_rows(data)?;
        debug!("Catalog store returned {} rows", rows.len());
        Ok(rows)
    }
}

/// Rows exported to a JSON file, used for offline runs.
pub struct FixtureStore {
    path: PathBuf,
}

impl FixtureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixtureStore { path: path.into() }
    }
}

#[async_trait]
impl CatalogStore for FixtureStore {
    async fn fetch_products(&self) -> Result<Vec<Value>, CatalogError> {
        info!("Reading catalog fixture {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Transport(format!("{}: {}", self.path.display(), e)))?;
        let data: Value = serde_json::from_str(&content)?;

        let mut rows = extract_rows(data)?;
        // The hosted table sorts server-side; mirror that for exported rows.
        rows.sort_by(|a, b| {
            let key = |row: &Value| {
                row.get("capacity_kw")
                    .and_then(|v| parse_number(v).ok().flatten())
                    .unwrap_or(0.0)
            };
            key(a).total_cmp(&key(b))
        });
        Ok(rows)
    }
}

fn extract_rows(data: Value) -> Result<Vec<Value>, CatalogError> {
    match data {
        Value::Array(rows) => Ok(rows),
        other => Err(CatalogError::Decode(format!(
            "expected an array of rows, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::env;

    #[test]
    fn test_extract_rows_requires_array() {
        assert_eq!(extract_rows(json!([{"id": 1}])).unwrap().len(), 1);

        let err = extract_rows(json!({"message": "JWT expired"})).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_rest_store_requires_credentials() {
        let config = StoreConfig::default();
        let result = RestCatalogStore::new(config);
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[tokio::test]
    async fn test_fixture_store_orders_by_capacity() {
        let path = env::temp_dir().join(format!("catalog-fixture-{}.json", uuid::Uuid::new_v4()));
        let rows = json!([
            {"id": "b", "name": "B", "capacity_kw": 5},
            {"id": "a", "name": "A", "capacity_kw": 3},
            {"id": "c", "name": "C"}
        ]);
        tokio::fs::write(&path, rows.to_string()).await.unwrap();

        let store = FixtureStore::new(&path);
        let fetched = store.fetch_products().await.unwrap();
        let ids: Vec<&str> = fetched.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_fixture_store_orders_decimal_strings() {
        let path = env::temp_dir().join(format!("catalog-fixture-{}.json", uuid::Uuid::new_v4()));
        let rows = json!([
            {"id": "big", "capacity_kw": "10.00"},
            {"id": "mid", "capacity_kw": 5},
            {"id": "small", "capacity_kw": "2.5"}
        ]);
        tokio::fs::write(&path, rows.to_string()).await.unwrap();

        let store = FixtureStore::new(&path);
        let fetched = store.fetch_products().await.unwrap();
        let ids: Vec<&str> = fetched.iter().filter_map(|r| r["id"].as_str()).collect();
        assert_eq!(ids, vec!["small", "mid", "big"]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_fixture_store_missing_file() {
        let store = FixtureStore::new("fixtures/does-not-exist.json");
        let err = store.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    #[ignore] // Run with --ignored flag for integration tests
    async fn test_live_store() {
        // Requires a reachable store and SUPABASE_ANON_KEY
        let Ok(base_url) = env::var("CATALOG_INTEGRATION_URL") else {
            return;
        };

        let mut config = StoreConfig::default();
        config.base_url = base_url;
        config.load_credentials().unwrap();

        let store = RestCatalogStore::new(config).unwrap();
        let rows = store.fetch_products().await.unwrap();
        assert!(rows.iter().all(|row| row.is_object()));
    }
}
