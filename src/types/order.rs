use serde::Deserialize;

/// Status of one sales order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderStatusResponse {
    pub sales_order_id: Option<String>,
    pub customer_id: Option<String>,
    pub purchase_order: Option<String>,
    pub status: Option<String>,
    pub date_entered: Option<String>,
}

/// One entry of the sales-order history listing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SalesOrderHistoryItem {
    pub sales_order_id: Option<String>,
    pub purchase_order: Option<String>,
    pub date_entered: Option<String>,
    pub order_total: Option<f64>,
}
