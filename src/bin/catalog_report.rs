use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::env;
use tracing::{error, info, warn};

use solar_catalog::config::{AppConfig, DEFAULT_CONFIG_PATH};
use solar_catalog::fetcher::{CatalogStore, RestCatalogStore};
use solar_catalog::logging::init_tracing;
use solar_catalog::processor::{FieldNormalizer, NormalizeReport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing("info")?;

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let mut config = AppConfig::load(&config_path)?;
    config
        .store
        .load_credentials()
        .context("Catalog store credentials are not set")?;

    info!("🚀 Checking catalog table {} at {}", config.store.table, config.store.base_url);

    let store = RestCatalogStore::new(config.store.clone())?;
    let rows = match store.fetch_products().await {
        Ok(rows) => rows,
        Err(e) => {
            error!("❌ Failed to fetch catalog: {}", e);
            return Err(e.into());
        }
    };

    let report = FieldNormalizer::new().normalize_rows(&rows);
    let quality = QualitySummary::from_report(&report);

    println!("\n=== CATALOG SUMMARY ===");
    println!("Rows fetched: {}", rows.len());
    for (category, count) in &quality.per_category {
        let label = if category.is_empty() { "<missing>" } else { category.as_str() };
        println!("  {:<16} {}", label, count);
    }

    println!("\n=== DATA QUALITY ===");
    println!("Rejected rows:        {}", report.rejected_rows);
    println!("Malformed fields:     {}", report.malformed_fields);
    println!("Unknown categories:   {}", quality.unknown_categories);
    println!("Rows without a name:  {}", quality.nameless);

    if quality.unknown_categories > 0 {
        warn!(
            "⚠️ {} rows only appear under \"All Products\" after Reset Filters",
            quality.unknown_categories
        );
    }

    if quality.never_displayed() > 0 {
        warn!("⚠️ Some rows will never appear on the catalog page");
    } else {
        info!("✅ Every row is displayable");
    }

    Ok(())
}

struct QualitySummary {
    per_category: BTreeMap<String, usize>,
    rejected_rows: usize,
    unknown_categories: usize,
    nameless: usize,
}

impl QualitySummary {
    fn from_report(report: &NormalizeReport) -> Self {
        let mut summary = QualitySummary {
            per_category: BTreeMap::new(),
            rejected_rows: report.rejected_rows,
            unknown_categories: 0,
            nameless: 0,
        };
        for product in &report.products {
            *summary.per_category.entry(product.category.to_string()).or_default() += 1;
            if !product.category.is_known() {
                summary.unknown_categories += 1;
            }
            if !product.has_name() {
                summary.nameless += 1;
            }
        }
        summary
    }

    /// Rows no filter combination can show. Unknown categories still show
    /// under the `all` wildcard, so they are not counted.
    fn never_displayed(&self) -> usize {
        self.rejected_rows + self.nameless
    }
}
