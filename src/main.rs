use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use solar_catalog::catalog::{CatalogClient, CatalogView, ProductCard, ProductDetail};
use solar_catalog::config::{AppConfig, DEFAULT_CONFIG_PATH};
use solar_catalog::fetcher::{CatalogStore, FixtureStore, RestCatalogStore};
use solar_catalog::logging::init_tracing;
use solar_catalog::models::{CategoryFilter, SortKey};
use solar_catalog::catalog::view::EMPTY_RESULT_MESSAGE;

/// Browse the solar product catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "solar-catalog", version)]
struct Args {
    /// Path to the catalog configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Read rows from an exported JSON file instead of the hosted store
    #[arg(long)]
    fixture: Option<String>,

    /// Category wire value (`on-grid`, `water_heating`, ...) or `all`
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    search: String,

    /// capacity-asc, capacity-desc, price-asc or price-desc
    #[arg(long)]
    sort: Option<String>,

    /// Show the detail overlay for this product id
    #[arg(long)]
    detail: Option<String>,

    /// Start a site-visit request for this product id
    #[arg(long)]
    buy: Option<String>,

    /// Apply the capacity/price/area/panel-type range filters
    #[arg(long)]
    apply_ranges: bool,

    /// Print the visible cards as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing("info")?;

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if args.apply_ranges {
        config.view.apply_range_filters = true;
    }

    let store: Arc<dyn CatalogStore> = match &args.fixture {
        Some(path) => {
            info!("📦 Using catalog fixture {}", path);
            Arc::new(FixtureStore::new(path))
        }
        None => {
            config
                .store
                .load_credentials()
                .context("Catalog store credentials are not set")?;
            info!("🌐 Using catalog store {}", config.store.base_url);
            Arc::new(RestCatalogStore::new(config.store.clone())?)
        }
    };

    let client = CatalogClient::new(store);
    let mut view = CatalogView::new(&config.view);
    view.load(&client).await;

    if let Some(category) = &args.category {
        view.set_category(CategoryFilter::parse(category));
    }
    if let Some(sort) = &args.sort {
        let sort_by = SortKey::parse(sort);
        if sort_by == SortKey::Unsorted {
            warn!("Unknown sort '{}', keeping store order", sort);
        }
        view.set_sort(sort_by);
    }
    view.set_search_query(args.search.as_str());

    if let Some(message) = view.catalog().error() {
        println!("{}", message);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.cards())?);
    } else {
        print_grid(&view);
    }

    if let Some(id) = &args.detail {
        if !view.select(id) {
            warn!("Product {} is not in the current view", id);
        }
        if let Some(detail) = view.detail() {
            print_detail(&detail);
        }
    }

    if let Some(id) = &args.buy {
        if view.buy_by_id(id) {
            if let Some(props) = view.lead_form_props() {
                println!(
                    "\nSite visit request: {} ({}, {} kW)",
                    props.product_name, props.product_sku, props.product_power
                );
            }
            view.close_lead_form();
        } else {
            warn!("Product {} not found", id);
        }
    }

    Ok(())
}

fn print_grid(view: &CatalogView) {
    println!("{}", view.heading());
    println!("{}\n", view.blurb());

    let cards = view.cards();
    if cards.is_empty() {
        println!("{}", EMPTY_RESULT_MESSAGE);
        return;
    }

    for card in &cards {
        print_card(card);
    }
    info!("📊 Showing {} products", cards.len());
}

fn print_card(card: &ProductCard) {
    println!("[{}] {} ({})", card.id, card.name, card.capacity_badge);
    if !card.description.is_empty() {
        println!("    {}", card.description);
    }
    println!("    Generation: {}   Savings: {}", card.generation, card.savings);
    println!("    From {}\n", card.price_from);
}

fn print_detail(detail: &ProductDetail) {
    println!("=== {} ===", detail.name);
    if !detail.description.is_empty() {
        println!("{}", detail.description);
    }
    println!("{}", detail.headline);

    if !detail.features.is_empty() {
        println!("\nIn the Box");
        for feature in &detail.features {
            println!("  ✓ {}", feature);
        }
    }

    println!("\nTech Specs");
    for row in detail.tech_specs.iter().chain(detail.extra_specs.iter()) {
        println!("  {:<16} {}", row.label, row.value);
    }

    match &detail.base_price {
        Some(base) => println!("\nFrom {} (was {}, after government subsidy)", detail.price_after_subsidy, base),
        None => println!("\nFrom {}", detail.price_after_subsidy),
    }
}
