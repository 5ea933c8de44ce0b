mod client;
mod dispatch;
mod family;

pub use client::DigikeyClient;
pub use dispatch::{CallStatus, RateLimits};
pub use family::ApiFamily;
