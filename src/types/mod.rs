//! Request and response schemas for the three API families.
//!
//! These mirror the vendor's wire contracts (PascalCase JSON) and are
//! deliberately shallow: only commonly-used fields are modeled, everything
//! else is ignored on deserialization. They carry no behavior.

mod batch;
mod order;
mod product;

pub use batch::{BatchProductDetailsRequest, BatchProductDetailsResponse};
pub use order::{OrderStatusResponse, SalesOrderHistoryItem};
pub use product::{DigiReelPricing, KeywordRequest, KeywordResponse, Product, ProductDetails};
