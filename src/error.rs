use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible error types while working with the Digi-Key APIs.
///
/// Nothing is swallowed: every failure propagates to the immediate caller.
/// The only local recovery in the crate is rate-limit telemetry, which
/// degrades to unknown values instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    /// The client was constructed with unusable inputs (empty credentials,
    /// missing storage directory). Raised before any network I/O.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The OAuth2 client-credentials exchange failed: the endpoint was
    /// unreachable, or it rejected the credentials. No retry is attempted.
    #[error("OAuth2 token exchange failed: {0}")]
    Authentication(String),

    /// The underlying vendor operation answered with a non-success status.
    /// The same status is mirrored into the caller's [`CallStatus`] sink
    /// before this error propagates.
    ///
    /// [`CallStatus`]: crate::CallStatus
    #[error("API call returned status {status}")]
    ApiCall {
        /// HTTP status code reported by the vendor.
        status: u16,
    },

    /// The bounded request timeout elapsed, on either the token exchange or
    /// the API call itself.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Anything else: undecodable payloads, token-store I/O faults, and
    /// other failures with no better classification.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl Error {
    /// The HTTP status carried by an [`Error::ApiCall`], if that is what
    /// this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiCall { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_call_exposes_its_status() {
        let error = Error::ApiCall { status: 404 };
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "API call returned status 404");
    }

    #[test]
    fn other_kinds_have_no_status() {
        assert_eq!(Error::Authentication("denied".into()).status(), None);
        assert_eq!(Error::Configuration("empty id".into()).status(), None);
    }
}
