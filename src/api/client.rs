use std::path::PathBuf;

use crate::api::dispatch::{CallStatus, DispatchWrapper, Operation, RateLimits};
use crate::api::family::ApiFamily;
use crate::config::{ClientSettings, Credentials};
use crate::error::{Error, Result};
use crate::types::{
    BatchProductDetailsRequest, BatchProductDetailsResponse, DigiReelPricing, KeywordRequest,
    KeywordResponse, OrderStatusResponse, ProductDetails, SalesOrderHistoryItem,
};

/// Typed surface over the Digi-Key v4 APIs.
///
/// The client itself holds no connection or token state: every operation
/// binds a fresh [`DispatchWrapper`], which re-checks the token cache and
/// refreshes only when the cached token is missing or expired. Two optional
/// sinks on each operation receive rate-limit and status telemetry for that
/// call.
#[derive(Clone, Debug)]
pub struct DigikeyClient {
    settings: ClientSettings,
}

impl DigikeyClient {
    /// Creates a client from the usual four inputs. `storage_path` must be
    /// an existing writable directory for the token cache.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        storage_path: impl Into<PathBuf>,
        sandbox: bool,
    ) -> Result<Self> {
        let settings = ClientSettings::new(
            Credentials::new(client_id, client_secret),
            storage_path,
        )
        .sandbox(sandbox);
        Self::with_settings(settings)
    }

    /// Creates a client from fully-specified settings (custom timeout, base
    /// URL overrides). Configuration problems surface here, before any
    /// network I/O.
    pub fn with_settings(settings: ClientSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Keyword search over the part catalog.
    pub async fn keyword_search(
        &self,
        request: &KeywordRequest,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<KeywordResponse> {
        let operation = Operation::post(
            "keyword_search",
            ApiFamily::Catalog,
            "search/keyword".to_string(),
            to_body("keyword_search", request)?,
        );
        self.dispatch(operation, limits, status).await
    }

    /// Detailed product information for one Digi-Key part number.
    pub async fn product_details(
        &self,
        part_number: &str,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<ProductDetails> {
        let operation = Operation::get(
            "product_details",
            ApiFamily::Catalog,
            format!("search/{part_number}/productdetails"),
        );
        self.dispatch(operation, limits, status).await
    }

    /// Digi-Reel pricing for a part number at a requested quantity.
    pub async fn digi_reel_pricing(
        &self,
        part_number: &str,
        quantity: u32,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<DigiReelPricing> {
        let operation = Operation::get(
            "digi_reel_pricing",
            ApiFamily::Catalog,
            format!("search/{part_number}/digireelpricing"),
        )
        .query("requestedQuantity", quantity.to_string());
        self.dispatch(operation, limits, status).await
    }

    /// Product information plus the vendor's suggested substitute parts.
    pub async fn suggested_parts(
        &self,
        part_number: &str,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<ProductDetails> {
        let operation = Operation::get(
            "suggested_parts",
            ApiFamily::Catalog,
            format!("search/{part_number}/suggestedparts"),
        );
        self.dispatch(operation, limits, status).await
    }

    /// Status of one sales order.
    pub async fn order_status(
        &self,
        sales_order_id: &str,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<OrderStatusResponse> {
        let operation = Operation::get(
            "order_status",
            ApiFamily::OrderSupport,
            format!("orders/{sales_order_id}"),
        );
        self.dispatch(operation, limits, status).await
    }

    /// Sales-order history over a date range (dates as `YYYY-MM-DD`).
    pub async fn order_history(
        &self,
        start_date: &str,
        end_date: &str,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<Vec<SalesOrderHistoryItem>> {
        let operation = Operation::get(
            "order_history",
            ApiFamily::OrderSupport,
            "orders".to_string(),
        )
        .query("startDate", start_date.to_string())
        .query("endDate", end_date.to_string());
        self.dispatch(operation, limits, status).await
    }

    /// Product details for many part numbers in one call.
    pub async fn batch_product_details(
        &self,
        request: &BatchProductDetailsRequest,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<BatchProductDetailsResponse> {
        let operation = Operation::post(
            "batch_product_details",
            ApiFamily::BatchSearch,
            "productdetails".to_string(),
            to_body("batch_product_details", request)?,
        );
        self.dispatch(operation, limits, status).await
    }

    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        operation: Operation,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<T> {
        DispatchWrapper::bind(&self.settings, operation)
            .await?
            .invoke(limits, status)
            .await
    }
}

fn to_body<T: serde::Serialize>(operation: &str, request: &T) -> Result<serde_json::Value> {
    serde_json::to_value(request)
        .map_err(|err| Error::Unexpected(format!("{operation}: could not encode request: {err}")))
}
