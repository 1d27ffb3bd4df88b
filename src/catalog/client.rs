use std::sync::Arc;
use tracing::{error, info, warn};

use crate::fetcher::CatalogStore;
use crate::models::Product;
use crate::processor::FieldNormalizer;

/// What the catalog page currently holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<Product>),
}

impl CatalogState {
    /// Products available to the pipeline; empty unless ready.
    pub fn products(&self) -> &[Product] {
        match self {
            CatalogState::Ready(products) => products,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Single-shot loader for the product table.
pub struct CatalogClient {
    store: Arc<dyn CatalogStore>,
    normalizer: FieldNormalizer,
}

impl CatalogClient {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CatalogClient {
            store,
            normalizer: FieldNormalizer::new(),
        }
    }

    /// Issues one ordered read and normalizes the rows. Failures become
    /// `CatalogState::Error`; nothing is retried.
    pub async fn load(&self) -> CatalogState {
        let rows = match self.store.fetch_products().await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Error fetching products: {}", e);
                return CatalogState::Error(e.user_message());
            }
        };

        let report = self.normalizer.normalize_rows(&rows);
        if report.malformed_fields > 0 {
            warn!(
                "Substituted defaults for {} malformed fields",
                report.malformed_fields
            );
        }

        info!("Loaded {} products", report.products.len());
        CatalogState::Ready(report.products)
    }
}
