use url::Url;

use crate::error::{Error, Result};

const PRODUCTION_BASE: &str = "https://api.digikey.com";
const SANDBOX_BASE: &str = "https://sandbox-api.digikey.com";

/// The three independently-hosted vendor API surfaces.
///
/// Each family maps to a fixed path segment its host is built from. The set
/// is closed: adding a fourth family means adding a variant here and
/// covering it in the two matches below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    /// Part search: keyword search, product details, pricing.
    Catalog,
    /// Order status and sales-order history.
    OrderSupport,
    /// Bulk product-details lookups.
    BatchSearch,
}

impl ApiFamily {
    /// The path segment the family's base host is built from.
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            ApiFamily::Catalog => "products",
            ApiFamily::OrderSupport => "OrderDetails",
            ApiFamily::BatchSearch => "BatchSearch",
        }
    }

    /// The base URL hosting every operation of this family:
    /// `{base}/{segment}/v4/`, where the base is the production host, the
    /// sandbox host, or a caller-supplied override.
    ///
    /// Pure: no I/O, and with a closed enum there is no unknown-family case.
    pub(crate) fn host(self, sandbox: bool, base_override: Option<&Url>) -> Result<Url> {
        let base = match base_override {
            Some(url) => url.as_str().trim_end_matches('/'),
            None if sandbox => SANDBOX_BASE,
            None => PRODUCTION_BASE,
        };
        // Trailing slash matters: relative operation paths join under /v4/.
        let rendered = format!("{base}/{}/v4/", self.path_segment());
        Url::parse(&rendered)
            .map_err(|err| Error::Configuration(format!("invalid API base `{rendered}`: {err}")))
    }
}
