use serde::{Deserialize, Serialize};

use super::Product;

/// Body of the batch product-details operation: up to the vendor's batch
/// limit of part numbers per request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchProductDetailsRequest {
    pub products: Vec<String>,
}

impl BatchProductDetailsRequest {
    pub fn new<I, S>(part_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            products: part_numbers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a batch product-details lookup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchProductDetailsResponse {
    pub product_details: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_part_numbers_under_products() {
        let request = BatchProductDetailsRequest::new(["296-24647-1-ND", "SN74LVC1G08DBVR"]);
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["Products"][0], "296-24647-1-ND");
        assert_eq!(encoded["Products"][1], "SN74LVC1G08DBVR");
    }
}
