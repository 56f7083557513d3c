use serde::Serialize;

/// Default billing unit for new products.
pub const DEFAULT_UNIT: &str = "hour";

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub unit: String,
    /// Price per unit; `None` when the product has no fixed rate.
    pub rate: Option<f64>,
    pub created_at: Option<String>,
}

impl Product {
    pub fn new(name: &str, unit: &str, rate: Option<f64>) -> Self {
        Product {
            id: None,
            name: name.to_string(),
            unit: unit.to_string(),
            rate,
            created_at: None,
        }
    }
}
