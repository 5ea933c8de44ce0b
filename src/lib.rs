//! Unofficial client for the Digi-Key v4 REST APIs.
//!
//! Digi-Key splits its v4 surface across three independently-hosted API
//! families: product search, order support, and batch product search. All
//! three authenticate with the same OAuth2 client-credentials grant, so this
//! crate centralizes token acquisition (with an on-disk cache keyed by client
//! and environment) and exposes each vendor operation as a typed method on
//! [`DigikeyClient`].
//!
//! Every call optionally reports transport telemetry back to the caller:
//! the vendor's rate-limit counters and the raw HTTP status, delivered
//! through mutable sinks the caller passes in.
//!
//! ```no_run
//! use digikey::{CallStatus, DigikeyClient, RateLimits};
//!
//! # async fn example() -> digikey::Result<()> {
//! let client = DigikeyClient::new("client-id", "client-secret", "/tmp", true)?;
//!
//! let mut limits = RateLimits::default();
//! let mut status = CallStatus::default();
//! let details = client
//!     .product_details("296-24647-1-ND", Some(&mut limits), Some(&mut status))
//!     .await?;
//!
//! println!("{details:?}");
//! println!("requests remaining: {:?}", limits.api_requests_remaining);
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod error;
mod oauth;
pub mod types;

pub use api::{ApiFamily, CallStatus, DigikeyClient, RateLimits};
pub use config::{ClientSettings, Credentials};
pub use error::{Error, Result};
pub use oauth::Token;
