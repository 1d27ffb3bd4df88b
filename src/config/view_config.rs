use serde::{Deserialize, Serialize};

use crate::models::{CategoryFilter, FilterCriteria, SortKey};

/// Initial state of the catalog page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Apply the capacity/price/area/panel-type criteria. Off by default: the
    /// live page only declares them.
    #[serde(default)]
    pub apply_range_filters: bool,
}

fn default_category() -> String {
    "on-grid".to_string()
}

fn default_sort() -> String {
    "capacity-asc".to_string()
}

impl ViewConfig {
    pub fn initial_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            category: CategoryFilter::parse(&self.default_category),
            sort_by: SortKey::parse(&self.default_sort),
            ..FilterCriteria::default()
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            default_sort: default_sort(),
            apply_range_filters: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_default_criteria() {
        let criteria = ViewConfig::default().initial_criteria();
        assert_eq!(criteria.category, CategoryFilter::Only(Category::OnGrid));
        assert_eq!(criteria.sort_by, SortKey::CapacityAsc);
        assert!(criteria.search_query.is_empty());
    }

    #[test]
    fn test_custom_defaults() {
        let config = ViewConfig {
            default_category: "water_pumping".to_string(),
            default_sort: "price-desc".to_string(),
            apply_range_filters: true,
        };
        let criteria = config.initial_criteria();
        assert_eq!(criteria.category, CategoryFilter::Only(Category::WaterPumping));
        assert_eq!(criteria.sort_by, SortKey::PriceDesc);
    }
}
