use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Applied to both the token exchange and API calls so neither network leg
/// can hang indefinitely.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The client identity used for the OAuth2 client-credentials grant,
/// in a struct out of ease.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both halves must be present before we attempt any network I/O.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(Error::Configuration("client_id must not be empty".into()));
        }
        if self.client_secret.is_empty() {
            return Err(Error::Configuration(
                "client_secret must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Everything the client needs beyond per-operation arguments.
///
/// `sandbox` selects the vendor's sandbox hosts for both the token endpoint
/// and the API families, and switches the token cache to a separate file so
/// sandbox tokens are never replayed against production.
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub credentials: Credentials,
    /// Directory the token cache file lives in. Must already exist and be
    /// writable.
    pub storage_path: PathBuf,
    pub sandbox: bool,
    /// Bound applied to each network round trip.
    pub timeout: Duration,
    /// Replaces the vendor API base (`https://api.digikey.com` or its
    /// sandbox variant). Intended for tests and proxies.
    pub api_base: Option<Url>,
    /// Replaces the authorization-endpoint base, same intent as `api_base`.
    pub auth_base: Option<Url>,
}

impl ClientSettings {
    pub fn new(credentials: Credentials, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials,
            storage_path: storage_path.into(),
            sandbox: false,
            timeout: DEFAULT_TIMEOUT,
            api_base: None,
            auth_base: None,
        }
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base(mut self, base: Url) -> Self {
        self.api_base = Some(base);
        self
    }

    pub fn auth_base(mut self, base: Url) -> Self {
        self.auth_base = Some(base);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        if !self.storage_path.is_dir() {
            return Err(Error::Configuration(format!(
                "token storage path `{}` is not a directory",
                self.storage_path.display()
            )));
        }
        Ok(())
    }
}
