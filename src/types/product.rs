use serde::{Deserialize, Serialize};

/// Body of the catalog keyword-search operation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordRequest {
    pub keywords: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl KeywordRequest {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            limit: None,
            offset: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// One catalog product as the vendor describes it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Product {
    pub manufacturer_product_number: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity_available: Option<i64>,
    pub product_status: Option<String>,
    pub product_url: Option<String>,
    pub datasheet_url: Option<String>,
}

/// Result set of a keyword search.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct KeywordResponse {
    pub products: Vec<Product>,
    pub products_count: i64,
}

/// Detailed information for a single part number. Also returned by the
/// suggested-parts operation, where `suggested_products` is populated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductDetails {
    pub product: Option<Product>,
    pub suggested_products: Vec<Product>,
}

/// Digi-Reel pricing for a part at a requested quantity.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DigiReelPricing {
    pub requested_quantity: Option<i64>,
    pub reel_price: Option<f64>,
    pub extended_price: Option<f64>,
}
