use std::cmp::Ordering;

use crate::models::{CategoryFilter, FilterCriteria, Product, RangeFilters, SortKey};

/// Turns the fetched list into the ordered list shown on the catalog page.
///
/// Products without a name are dropped, the category is a hard filter, the
/// search query is a case-insensitive substring match on the name, and the
/// sort is stable.
pub fn select<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    search_query: &str,
    sort_by: SortKey,
) -> Vec<&'a Product> {
    let needle = search_query.to_lowercase();

    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|product| product.has_name())
        .filter(|product| category.matches(&product.category))
        .filter(|product| matches_search(product, &needle))
        .collect();

    sort_products(&mut visible, sort_by);
    visible
}

/// Same as [`select`], with every range criterion from the filter drawer
/// applied as well.
pub fn select_with_ranges<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut visible = select(
        products,
        &criteria.category,
        &criteria.search_query,
        criteria.sort_by,
    );
    visible.retain(|product| within_ranges(product, &criteria.ranges));
    visible
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty() || product.name.to_lowercase().contains(needle)
}

fn within_ranges(product: &Product, ranges: &RangeFilters) -> bool {
    ranges.capacity.contains(product.capacity_kw)
        && ranges.price.contains(product.price)
        && product.area_required.is_none_or(|area| ranges.area.contains(area))
        && ranges.panel_type.matches(product.panel_type.as_deref())
}

fn sort_products(products: &mut [&Product], sort_by: SortKey) {
    let compare: fn(&&Product, &&Product) -> Ordering = match sort_by {
        SortKey::CapacityAsc => |a, b| a.capacity_kw.total_cmp(&b.capacity_kw),
        SortKey::CapacityDesc => |a, b| b.capacity_kw.total_cmp(&a.capacity_kw),
        SortKey::PriceAsc => |a, b| a.price.total_cmp(&b.price),
        SortKey::PriceDesc => |a, b| b.price.total_cmp(&a.price),
        SortKey::Unsorted => return,
    };
    // slice::sort_by is stable
    products.sort_by(compare);
}
