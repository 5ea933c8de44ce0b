use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Seconds before the advertised expiry at which we stop trusting a token.
/// Covers clock skew and the time the API call itself takes.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// An issued OAuth2 access token and when it stops being usable.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    /// Authorization scheme the vendor issued the token under, e.g. `Bearer`.
    pub token_type: String,
    /// Unix timestamp (seconds) past which the token must not be used.
    pub expires_at: u64,
}

impl Token {
    /// Builds a token from the exchange response's relative lifetime.
    pub(crate) fn issued_now(access_token: String, token_type: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type,
            expires_at: unix_now().saturating_add(expires_in),
        }
    }

    /// Whether the token is past (or within the safety margin of) expiry.
    pub fn is_expired(&self) -> bool {
        unix_now().saturating_add(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// A ready-to-use `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
