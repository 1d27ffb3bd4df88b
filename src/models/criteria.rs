use serde::{Deserialize, Serialize};
use std::fmt;

use super::product::Category;

/// Category selection on the catalog page.
///
/// `All` is the sentinel set by "Reset Filters" and bypasses the category
/// equality check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from_wire(value))
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Only(Category::OnGrid)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CapacityAsc,
    CapacityDesc,
    PriceAsc,
    PriceDesc,
    /// Any unrecognised sort value; keeps input order.
    Unsorted,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "capacity-asc" => SortKey::CapacityAsc,
            "capacity-desc" => SortKey::CapacityDesc,
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CapacityAsc => "capacity-asc",
            SortKey::CapacityDesc => "capacity-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Unsorted => "unsorted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTypeFilter {
    #[default]
    All,
    Monocrystalline,
    Polycrystalline,
}

impl PanelTypeFilter {
    pub fn matches(&self, panel_type: Option<&str>) -> bool {
        let wanted = match self {
            PanelTypeFilter::All => return true,
            PanelTypeFilter::Monocrystalline => "monocrystalline",
            PanelTypeFilter::Polycrystalline => "polycrystalline",
        };
        panel_type.is_some_and(|value| value.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Range criteria shown in the filter drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFilters {
    pub capacity: Range,
    pub price: Range,
    pub panel_type: PanelTypeFilter,
    pub area: Range,
}

impl Default for RangeFilters {
    fn default() -> Self {
        Self {
            capacity: Range::new(0.0, 20.0),
            price: Range::new(0.0, 1_000_000.0),
            panel_type: PanelTypeFilter::All,
            area: Range::new(0.0, 2000.0),
        }
    }
}

/// Everything the pipeline needs to turn the fetched list into the visible one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub search_query: String,
    pub sort_by: SortKey,
    pub ranges: RangeFilters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("capacity-asc"), SortKey::CapacityAsc);
        assert_eq!(SortKey::parse("price-desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("Price-Desc"), SortKey::Unsorted);
        assert_eq!(SortKey::parse("newest"), SortKey::Unsorted);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("hybrid"), CategoryFilter::Only(Category::Hybrid));
        assert_eq!(CategoryFilter::default().to_string(), "on-grid");
    }

    #[test]
    fn test_all_matches_unknown_category() {
        let unknown = Category::Unknown("panels".to_string());
        assert!(CategoryFilter::All.matches(&unknown));
        assert!(!CategoryFilter::Only(Category::OnGrid).matches(&unknown));
    }

    #[test]
    fn test_panel_type_filter() {
        assert!(PanelTypeFilter::All.matches(None));
        assert!(PanelTypeFilter::Monocrystalline.matches(Some("Monocrystalline")));
        assert!(!PanelTypeFilter::Monocrystalline.matches(Some("Polycrystalline")));
        assert!(!PanelTypeFilter::Polycrystalline.matches(None));
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = Range::new(1.0, 5.0);
        assert!(range.contains(1.0));
        assert!(range.contains(5.0));
        assert!(!range.contains(5.01));
    }
}
