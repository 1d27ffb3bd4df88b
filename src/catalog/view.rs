use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::client::{CatalogClient, CatalogState};
use super::detail::{ProductCard, ProductDetail};
use crate::config::ViewConfig;
use crate::models::{Category, CategoryFilter, FilterCriteria, Product, RangeFilters, SortKey};
use crate::processor::{select, select_with_ranges};

pub const EMPTY_RESULT_MESSAGE: &str = "No products match your current filters.";

/// Site-visit request raised by a "Buy" action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRequest {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub power: f64,
    pub requested_at: DateTime<Utc>,
}

impl LeadRequest {
    pub fn for_product(product: &Product) -> Self {
        LeadRequest {
            id: Uuid::new_v4(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            power: product.capacity_kw,
            requested_at: Utc::now(),
        }
    }
}

/// Inputs handed to the site-visit form. The form reports closing through
/// [`CatalogView::close_lead_form`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeadFormProps<'a> {
    pub is_open: bool,
    pub product_sku: &'a str,
    pub product_name: &'a str,
    pub product_power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    Detail,
}

/// Issued by [`CatalogView::begin_load`]; a result is only applied while its
/// ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// State of the catalog page: loaded data, filter criteria, the selected
/// product and the site-visit form.
#[derive(Debug)]
pub struct CatalogView {
    catalog: CatalogState,
    criteria: FilterCriteria,
    apply_range_filters: bool,
    selected: Option<String>,
    lead_form: Option<LeadRequest>,
    mounted: bool,
    load_generation: u64,
}

impl CatalogView {
    pub fn new(config: &ViewConfig) -> Self {
        CatalogView {
            catalog: CatalogState::Loading,
            criteria: config.initial_criteria(),
            apply_range_filters: config.apply_range_filters,
            selected: None,
            lead_form: None,
            mounted: true,
            load_generation: 0,
        }
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.catalog = CatalogState::Loading;
        LoadTicket(self.load_generation)
    }

    /// Applies a finished load. Returns `false` when the view was unmounted
    /// or a newer load was started in the meantime.
    pub fn finish_load(&mut self, ticket: LoadTicket, state: CatalogState) -> bool {
        if !self.mounted || ticket.0 != self.load_generation {
            debug!("Discarding stale catalog load (ticket {})", ticket.0);
            return false;
        }
        self.catalog = state;
        true
    }

    /// Fetches once through `client` and applies the result.
    pub async fn load(&mut self, client: &CatalogClient) -> bool {
        let ticket = self.begin_load();
        let state = client.load().await;
        self.finish_load(ticket, state)
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.load_generation += 1;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.criteria.sort_by = sort_by;
    }

    pub fn set_ranges(&mut self, ranges: RangeFilters) {
        self.criteria.ranges = ranges;
    }

    /// "Reset Filters": every category, empty query, default ranges.
    pub fn reset_filters(&mut self) {
        self.criteria.category = CategoryFilter::All;
        self.criteria.search_query.clear();
        self.criteria.ranges = RangeFilters::default();
    }

    /// Ordered products for the grid.
    pub fn visible(&self) -> Vec<&Product> {
        let products = self.catalog.products();
        if self.apply_range_filters {
            select_with_ranges(products, &self.criteria)
        } else {
            select(
                products,
                &self.criteria.category,
                &self.criteria.search_query,
                self.criteria.sort_by,
            )
        }
    }

    pub fn cards(&self) -> Vec<ProductCard> {
        self.visible().into_iter().map(ProductCard::from_product).collect()
    }

    pub fn is_empty_result(&self) -> bool {
        !self.catalog.is_loading() && self.visible().is_empty()
    }

    pub fn heading(&self) -> &str {
        match &self.criteria.category {
            CategoryFilter::All => "All Products",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn blurb(&self) -> &'static str {
        match &self.criteria.category {
            CategoryFilter::All => {
                "Browse our complete collection of premium solar systems tailored for various needs."
            }
            CategoryFilter::Only(category) => category.blurb(),
        }
    }

    /// Category tabs with their active flag.
    pub fn category_tabs(&self) -> Vec<(Category, bool)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let active = self.criteria.category == CategoryFilter::Only(category.clone());
                (category, active)
            })
            .collect()
    }

    pub fn mode(&self) -> ViewMode {
        if self.selected.is_some() {
            ViewMode::Detail
        } else {
            ViewMode::Browsing
        }
    }

    /// Opens the detail overlay for a product in the current grid. Ids that
    /// are not visible are ignored.
    pub fn select(&mut self, product_id: &str) -> bool {
        let visible = self.visible().iter().any(|p| p.id == product_id);
        if !visible {
            debug!("Ignoring selection of product {} outside the current view", product_id);
            return false;
        }
        self.selected = Some(product_id.to_string());
        true
    }

    /// Closes the detail overlay together with any site-visit form on top of it.
    pub fn close(&mut self) {
        self.selected = None;
        self.lead_form = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolves the selection once. `None` when nothing is selected or the
    /// product is no longer in the loaded list.
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected.as_deref()?;
        self.catalog.products().iter().find(|p| p.id == id)
    }

    pub fn detail(&self) -> Option<ProductDetail> {
        self.selected_product().map(ProductDetail::from_product)
    }

    /// "Buy" on a card or in the overlay. Leaves the browsing/detail state alone.
    pub fn buy(&mut self, product: &Product) {
        let request = LeadRequest::for_product(product);
        info!(
            "Opening site visit form {} for {} ({})",
            request.id, request.name, request.sku
        );
        self.lead_form = Some(request);
    }

    pub fn buy_by_id(&mut self, product_id: &str) -> bool {
        let product = self
            .catalog
            .products()
            .iter()
            .find(|p| p.id == product_id)
            .cloned();
        match product {
            Some(product) => {
                self.buy(&product);
                true
            }
            None => false,
        }
    }

    pub fn buy_selected(&mut self) -> bool {
        match self.selected_product().cloned() {
            Some(product) => {
                self.buy(&product);
                true
            }
            None => false,
        }
    }

    /// `onClose` from the site-visit form.
    pub fn close_lead_form(&mut self) {
        self.lead_form = None;
    }

    pub fn lead_request(&self) -> Option<&LeadRequest> {
        self.lead_form.as_ref()
    }

    pub fn lead_form_props(&self) -> Option<LeadFormProps<'_>> {
        self.lead_form.as_ref().map(|request| LeadFormProps {
            is_open: true,
            product_sku: &request.sku,
            product_name: &request.name,
            product_power: request.power,
        })
    }
}
