use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::models::{Category, Product};

/// A `product_skus` row as the store hands it over, before normalization.
#[derive(Debug, Deserialize)]
struct RawProductRow {
    #[serde(default, deserialize_with = "id_string")]
    id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    name: String,
    #[serde(default)]
    capacity_kw: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    generation: Option<String>,
    #[serde(default)]
    area_required: Value,
    #[serde(default)]
    monthly_savings: Value,
    #[serde(default)]
    subsidy_amount: Value,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    original_price: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    panel_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    image_url: String,
    #[serde(default)]
    features: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    category: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    sku: String,
    #[serde(default)]
    specifications: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    installation_time: Option<String>,
    #[serde(default)]
    inventory_count: Value,
}

/// Outcome of normalizing a whole response body.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub products: Vec<Product>,
    pub malformed_fields: usize,
    pub rejected_rows: usize,
}

pub struct FieldNormalizer;

impl FieldNormalizer {
    pub fn new() -> Self {
        FieldNormalizer
    }

    pub fn normalize_rows(&self, rows: &[Value]) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(row) {
                Ok((product, malformed)) => {
                    report.malformed_fields += malformed;
                    report.products.push(product);
                }
                Err(e) => {
                    report.rejected_rows += 1;
                    warn!("Skipping product row at index {}: {}", index, e);
                    if let Some(id) = row.get("id") {
                        warn!("Rejected product id: {}", id);
                    }
                }
            }
        }

        info!(
            "Normalization summary: {} products, {} malformed fields, {} rejected rows",
            report.products.len(),
            report.malformed_fields,
            report.rejected_rows
        );

        report
    }

    /// Normalizes one row, returning the product and how many fields had to be
    /// replaced with defaults.
    pub fn normalize_row(&self, row: &Value) -> Result<(Product, usize), serde_json::Error> {
        if !row.is_object() {
            return Err(de::Error::custom(format!("expected a product object, got {}", row)));
        }
        let raw = RawProductRow::deserialize(row)?;
        let mut malformed = 0;

        let capacity_kw =
            number_field(&raw.id, "capacity_kw", &raw.capacity_kw, &mut malformed).unwrap_or(0.0);
        let price = number_field(&raw.id, "price", &raw.price, &mut malformed).unwrap_or(0.0);
        let area_required = number_field(&raw.id, "area_required", &raw.area_required, &mut malformed);
        let monthly_savings =
            number_field(&raw.id, "monthly_savings", &raw.monthly_savings, &mut malformed);
        let subsidy_amount =
            number_field(&raw.id, "subsidy_amount", &raw.subsidy_amount, &mut malformed);
        let original_price =
            number_field(&raw.id, "original_price", &raw.original_price, &mut malformed);
        let inventory_count =
            number_field(&raw.id, "inventory_count", &raw.inventory_count, &mut malformed);

        let features = match normalize_features(&raw.features) {
            Some(features) => features,
            None => {
                malformed += 1;
                warn!("Product {} has malformed features: {}", raw.id, raw.features);
                Vec::new()
            }
        };

        let specifications = match normalize_specifications(&raw.specifications) {
            Some(specifications) => specifications,
            None => {
                malformed += 1;
                warn!(
                    "Product {} has malformed specifications: {}",
                    raw.id, raw.specifications
                );
                Map::new()
            }
        };

        let product = Product {
            id: raw.id,
            name: raw.name,
            capacity_kw,
            generation: raw.generation,
            area_required,
            monthly_savings,
            subsidy_amount,
            price,
            original_price,
            panel_type: raw.panel_type,
            image_url: raw.image_url,
            features,
            description: raw.description,
            category: Category::from_wire(&raw.category),
            sku: raw.sku,
            specifications,
            installation_time: raw.installation_time,
            inventory_count,
        };

        Ok((product, malformed))
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical form of the `features` column.
///
/// Returns `None` when the value is present but unusable; absent or null
/// values normalize to an empty list.
pub fn normalize_features(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => Some(items.iter().map(feature_text).collect()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Some(items.iter().map(feature_text).collect()),
            _ => None,
        },
        _ => None,
    }
}

/// Canonical form of the `specifications` column. Same contract as
/// [`normalize_features`].
pub fn normalize_specifications(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Null => Some(Map::new()),
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

fn feature_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numeric columns may come back as JSON numbers or, for `numeric` columns,
/// as decimal strings. Null and blank strings are `Ok(None)`.
pub fn parse_number(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid number: {}", s)),
        Value::Null => Ok(None),
        other => Err(format!("invalid number: {}", other)),
    }
}

/// Parses one numeric column, counting and logging a value that is not a number.
fn number_field(id: &str, column: &str, value: &Value, malformed: &mut usize) -> Option<f64> {
    match parse_number(value) {
        Ok(number) => number,
        Err(e) => {
            *malformed += 1;
            warn!("Product {} has malformed {}: {}", id, column, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_features_from_serialized_text() {
        let parsed = normalize_features(&json!("[\"X\",\"Y\"]")).unwrap();
        assert_eq!(parsed, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn test_features_text_matches_native() {
        let native = normalize_features(&json!(["Panels", "Inverter", "Mounting"]));
        let text = normalize_features(&json!("[\"Panels\",\"Inverter\",\"Mounting\"]"));
        assert_eq!(native, text);
    }

    #[test]
    fn test_unparsable_features_are_malformed() {
        assert_eq!(normalize_features(&json!("not json")), None);
        assert_eq!(normalize_features(&json!("{\"a\":1}")), None);
        assert_eq!(normalize_features(&json!(42)), None);
        assert_eq!(normalize_features(&Value::Null), Some(Vec::new()));
    }

    #[test]
    fn test_specifications_normalization() {
        let native = normalize_specifications(&json!({"inverter": "5kW", "warranty_years": 25})).unwrap();
        assert_eq!(native["warranty_years"], json!(25));

        let text = normalize_specifications(&json!("{\"inverter\":\"5kW\"}")).unwrap();
        assert_eq!(text["inverter"], json!("5kW"));

        assert_eq!(normalize_specifications(&json!("[1,2]")), None);
        assert_eq!(normalize_specifications(&json!("oops")), None);
        assert_eq!(normalize_specifications(&Value::Null), Some(Map::new()));
    }

    #[test]
    fn test_normalize_row_substitutes_defaults() {
        let normalizer = FieldNormalizer::new();
        let row = json!({
            "id": 7,
            "name": "Home Saver 3kW",
            "capacity_kw": 3,
            "price": "185000.00",
            "subsidy_amount": null,
            "image_url": "https://cdn.example.com/3kw.jpg",
            "features": "not json",
            "specifications": "{\"phase\":\"single\"}",
            "category": "on-grid",
            "sku": "OG-3"
        });

        let (product, malformed) = normalizer.normalize_row(&row).unwrap();
        assert_eq!(malformed, 1);
        assert_eq!(product.id, "7");
        assert_eq!(product.price, 185000.0);
        assert_eq!(product.subsidy_amount, None);
        assert!(product.features.is_empty());
        assert_eq!(product.specifications["phase"], json!("single"));
        assert_eq!(product.category, Category::OnGrid);
    }

    #[test]
    fn test_missing_name_is_kept_for_pipeline() {
        let normalizer = FieldNormalizer::new();
        let row = json!({"id": "x", "category": "hybrid", "capacity_kw": 5, "price": 1});
        let (product, _) = normalizer.normalize_row(&row).unwrap();
        assert!(!product.has_name());
    }

    #[test]
    fn test_normalize_rows_rejects_non_objects() {
        let normalizer = FieldNormalizer::new();
        let rows = vec![
            json!({"id": "1", "name": "A", "category": "on-grid", "capacity_kw": 3, "price": 100000}),
            json!("garbage"),
            json!({"id": "2", "name": "B", "category": "on-grid", "capacity_kw": "five", "price": 1}),
            json!([1, 2, 3]),
        ];

        let report = normalizer.normalize_rows(&rows);
        assert_eq!(report.products.len(), 2);
        assert_eq!(report.rejected_rows, 2);
        assert_eq!(report.malformed_fields, 1);
        assert_eq!(report.products[1].name, "B");
        assert_eq!(report.products[1].capacity_kw, 0.0);
    }

    #[test]
    fn test_bad_optional_number_keeps_row() {
        let normalizer = FieldNormalizer::new();
        let row = json!({
            "id": "x",
            "name": "Kit",
            "category": "on-grid",
            "capacity_kw": 3,
            "price": 1,
            "inventory_count": "n/a",
            "area_required": {"sqft": 120}
        });

        let report = normalizer.normalize_rows(&[row]);
        assert_eq!(report.rejected_rows, 0);
        assert_eq!(report.malformed_fields, 2);
        let product = &report.products[0];
        assert_eq!(product.inventory_count, None);
        assert_eq!(product.area_required, None);
        assert_eq!(product.capacity_kw, 3.0);
    }

    #[test]
    fn test_bad_required_number_defaults_to_zero() {
        let normalizer = FieldNormalizer::new();
        let row = json!({"id": "y", "name": "Pump", "category": "water_pumping", "capacity_kw": 2, "price": "TBD"});
        let (product, malformed) = normalizer.normalize_row(&row).unwrap();
        assert_eq!(malformed, 1);
        assert_eq!(product.price, 0.0);
        assert_eq!(product.capacity_kw, 2.0);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&json!(3.5)), Ok(Some(3.5)));
        assert_eq!(parse_number(&json!(" 12.50 ")), Ok(Some(12.5)));
        assert_eq!(parse_number(&json!("")), Ok(None));
        assert_eq!(parse_number(&Value::Null), Ok(None));
        assert!(parse_number(&json!("n/a")).is_err());
        assert!(parse_number(&json!(true)).is_err());
    }
}
