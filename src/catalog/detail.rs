//! Display-ready views of a product: the grid card and the detail overlay.
//!
//! Both are built once from a resolved `&Product` so the renderer never looks
//! the product up again.

use serde::Serialize;
use serde_json::Value;

use crate::models::Product;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub capacity_badge: String,
    pub generation: String,
    pub savings: String,
    pub price_from: String,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        ProductCard {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_url.clone(),
            capacity_badge: format!("{} kW", format_number(product.capacity_kw)),
            generation: or_not_available(product.generation.as_deref()),
            savings: match product.monthly_savings {
                Some(savings) if savings != 0.0 => format!("{}/mo", format_rupees(savings)),
                _ => format!("₹{}/mo", NOT_AVAILABLE),
            },
            price_from: format_rupees(product.effective_price()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

/// The selected product, resolved once per recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub headline: String,
    pub features: Vec<String>,
    pub tech_specs: Vec<SpecRow>,
    pub extra_specs: Vec<SpecRow>,
    pub price_after_subsidy: String,
    /// Struck-through base price, present only when a subsidy applies.
    pub base_price: Option<String>,
}

impl ProductDetail {
    pub fn from_product(product: &Product) -> Self {
        let subsidised = product.subsidy_amount.is_some_and(|s| s > 0.0);

        let tech_specs = vec![
            spec("Capacity", format!("{} kW", format_number(product.capacity_kw))),
            spec("Generation", or_not_available(product.generation.as_deref())),
            spec(
                "Area Required",
                product
                    .area_required
                    .map(|area| format!("{} sq.ft", format_number(area)))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            spec(
                "Monthly Savings",
                product
                    .monthly_savings
                    .map(|savings| format!("{}/mo", format_rupees(savings)))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            spec("Panel Type", or_not_available(product.panel_type.as_deref())),
            spec("Installation", or_not_available(product.installation_time.as_deref())),
        ];

        let extra_specs = product
            .specifications
            .iter()
            .map(|(key, value)| spec(&humanize_key(key), spec_value(value)))
            .collect();

        ProductDetail {
            id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_url.clone(),
            headline: format!("Premium {}kW System", format_number(product.capacity_kw)),
            features: product.features.clone(),
            tech_specs,
            extra_specs,
            price_after_subsidy: format_rupees(product.effective_price()),
            base_price: subsidised.then(|| format_rupees(product.price)),
        }
    }
}

fn spec(label: &str, value: String) -> SpecRow {
    SpecRow {
        label: label.to_string(),
        value,
    }
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn spec_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}

fn humanize_key(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `3.0` → `3`, `3.25` → `3.25`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Rupee amount with Indian digit grouping, e.g. `₹1,02,000`.
pub fn format_rupees(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let whole = paise / 100;
    let fraction = paise % 100;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::models::product::sample_product;
    use serde_json::json;

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(999.0), "₹999");
        assert_eq!(format_rupees(1000.0), "₹1,000");
        assert_eq!(format_rupees(102000.0), "₹1,02,000");
        assert_eq!(format_rupees(12345678.0), "₹1,23,45,678");
        assert_eq!(format_rupees(1500.5), "₹1,500.50");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(2.333), "2.33");
    }

    #[test]
    fn test_card_defaults() {
        let product = sample_product("1", "Home 3kW", Category::OnGrid, 3.0, 180000.0);
        let card = ProductCard::from_product(&product);
        assert_eq!(card.capacity_badge, "3 kW");
        assert_eq!(card.generation, "N/A");
        assert_eq!(card.savings, "₹N/A/mo");
        assert_eq!(card.price_from, "₹1,80,000");
    }

    #[test]
    fn test_detail_with_subsidy() {
        let mut product = sample_product("1", "Home 3kW", Category::OnGrid, 3.0, 180000.0);
        product.subsidy_amount = Some(78000.0);
        product.generation = Some("12 units".to_string());
        product.area_required = Some(300.0);
        product.specifications.insert("warranty_years".to_string(), json!(25));

        let detail = ProductDetail::from_product(&product);
        assert_eq!(detail.headline, "Premium 3kW System");
        assert_eq!(detail.price_after_subsidy, "₹1,02,000");
        assert_eq!(detail.base_price.as_deref(), Some("₹1,80,000"));
        assert_eq!(detail.tech_specs[1].value, "12 units");
        assert_eq!(detail.tech_specs[2].value, "300 sq.ft");
        assert_eq!(detail.extra_specs, vec![spec("Warranty Years", "25".to_string())]);
    }

    #[test]
    fn test_detail_subsidy_exceeding_price() {
        let mut product = sample_product("1", "Tiny", Category::Lighting, 0.1, 5000.0);
        product.subsidy_amount = Some(7000.0);
        let detail = ProductDetail::from_product(&product);
        assert_eq!(detail.price_after_subsidy, "₹0");
        assert_eq!(detail.base_price.as_deref(), Some("₹5,000"));
    }
}
