use serde::{Deserialize, Serialize};

/// A catalog entry. The slug is the only externally addressable key and is
/// unique across the catalog; category is a non-unique grouping label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
}

fn default_rating() -> f64 {
    5.0
}
