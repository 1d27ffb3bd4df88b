use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Product category as stored in the `category` column.
///
/// Wire values are matched exactly and case-sensitively. Anything else is kept
/// as `Unknown` so the row still reaches the view but never matches a concrete
/// category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    OnGrid,
    OffGrid,
    Hybrid,
    Fencing,
    Lighting,
    WaterHeating,
    WaterPumping,
    RockLighting,
    Unknown(String),
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::OnGrid,
        Category::OffGrid,
        Category::Hybrid,
        Category::Fencing,
        Category::Lighting,
        Category::WaterHeating,
        Category::WaterPumping,
        Category::RockLighting,
    ];

    pub fn from_wire(value: &str) -> Self {
        match value {
            "on-grid" => Category::OnGrid,
            "off-grid" => Category::OffGrid,
            "hybrid" => Category::Hybrid,
            "fencing" => Category::Fencing,
            "lighting" => Category::Lighting,
            "water_heating" => Category::WaterHeating,
            "water_pumping" => Category::WaterPumping,
            "rock_lighting" => Category::RockLighting,
            other => Category::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Category::OnGrid => "on-grid",
            Category::OffGrid => "off-grid",
            Category::Hybrid => "hybrid",
            Category::Fencing => "fencing",
            Category::Lighting => "lighting",
            Category::WaterHeating => "water_heating",
            Category::WaterPumping => "water_pumping",
            Category::RockLighting => "rock_lighting",
            Category::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }

    /// Label used on the category navigation bar and as the section heading.
    pub fn label(&self) -> &str {
        match self {
            Category::OnGrid => "On-Grid Systems",
            Category::OffGrid => "Off-Grid Systems",
            Category::Hybrid => "Hybrid Systems",
            Category::Fencing => "Fencing Systems",
            Category::Lighting => "Street Lights",
            Category::WaterHeating => "Water Heaters",
            Category::WaterPumping => "Water Pumps",
            Category::RockLighting => "Rock Lights",
            Category::Unknown(raw) => raw,
        }
    }

    pub fn blurb(&self) -> &'static str {
        const HOMES: &str =
            "Specially designed for homes, maximizing energy production with minimal roof space.";
        const BUSINESS: &str =
            "High-capacity systems for businesses looking to reduce operational costs.";
        const INDUSTRIAL: &str =
            "Industrial-grade solar systems for large-scale facilities and manufacturing plants.";

        match self {
            Category::OnGrid | Category::Fencing | Category::WaterPumping => HOMES,
            Category::Hybrid | Category::WaterHeating => INDUSTRIAL,
            Category::OffGrid | Category::Lighting | Category::RockLighting => BUSINESS,
            Category::Unknown(_) => BUSINESS,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown(String::new())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_wire(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_wire().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A normalized row of the `product_skus` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub capacity_kw: f64,
    pub generation: Option<String>,
    pub area_required: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub subsidy_amount: Option<f64>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub panel_type: Option<String>,
    pub image_url: String,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub category: Category,
    pub sku: String,
    pub specifications: Map<String, Value>,
    pub installation_time: Option<String>,
    pub inventory_count: Option<f64>,
}

impl Product {
    /// Price after subsidy, never below zero.
    pub fn effective_price(&self) -> f64 {
        (self.price - self.subsidy_amount.unwrap_or(0.0)).max(0.0)
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_product(id: &str, name: &str, category: Category, capacity_kw: f64, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        capacity_kw,
        generation: None,
        area_required: None,
        monthly_savings: None,
        subsidy_amount: None,
        price,
        original_price: None,
        panel_type: None,
        image_url: format!("https://cdn.example.com/{}.jpg", id),
        features: Vec::new(),
        description: None,
        category,
        sku: format!("SKU-{}", id),
        specifications: Map::new(),
        installation_time: None,
        inventory_count: None,
    }
}
