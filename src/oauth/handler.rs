use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::oauth::{Token, TokenStore};

/// The client-credentials token endpoint, relative to the auth base.
const TOKEN_ENDPOINT_PATH: &str = "/v1/oauth2/token";

const PRODUCTION_AUTH_BASE: &str = "https://api.digikey.com";
const SANDBOX_AUTH_BASE: &str = "https://sandbox-api.digikey.com";

/// The token endpoint's response format.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Orchestrates the OAuth2 client-credentials flow.
///
/// Checks the on-disk [`TokenStore`] first; only a missing or expired record
/// triggers a network exchange, and a successful exchange is persisted
/// before being handed back. One cache miss costs exactly one round trip.
pub(crate) struct TokenHandler<'a> {
    settings: &'a ClientSettings,
    store: TokenStore,
}

impl<'a> TokenHandler<'a> {
    pub(crate) fn new(settings: &'a ClientSettings) -> Self {
        Self {
            store: TokenStore::new(&settings.storage_path, settings.sandbox),
            settings,
        }
    }

    /// Returns a currently-valid access token for this client/environment.
    pub(crate) async fn acquire(&self, http: &reqwest::Client) -> Result<Token> {
        let client_id = &self.settings.credentials.client_id;

        if let Some(token) = self.store.load(client_id, self.settings.sandbox) {
            if !token.is_expired() {
                debug!("reusing cached access token");
                return Ok(token);
            }
            debug!("cached access token expired; requesting a fresh one");
        }

        let token = self.exchange(http).await?;
        self.store
            .save(client_id, self.settings.sandbox, &token)?;
        Ok(token)
    }

    /// Performs the OAuth2 client-credentials exchange against the vendor's
    /// authorization endpoint.
    async fn exchange(&self, http: &reqwest::Client) -> Result<Token> {
        let url = self.token_url()?;
        let form = [
            ("client_id", self.settings.credentials.client_id.as_str()),
            (
                "client_secret",
                self.settings.credentials.client_secret.as_str(),
            ),
            ("grant_type", "client_credentials"),
        ];

        debug!(%url, "requesting access token");
        let response = http.post(url).form(&form).send().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout(format!("token exchange: {err}"))
            } else {
                Error::Authentication(format!("token endpoint unreachable: {err}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "OAuth2 token exchange rejected");
            return Err(Error::Authentication(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|err| Error::Authentication(format!("malformed token response: {err}")))?;

        Ok(Token::issued_now(
            parsed.access_token,
            parsed.token_type,
            parsed.expires_in,
        ))
    }

    fn token_url(&self) -> Result<Url> {
        let rendered = match &self.settings.auth_base {
            Some(base) => format!(
                "{}{TOKEN_ENDPOINT_PATH}",
                base.as_str().trim_end_matches('/')
            ),
            None if self.settings.sandbox => format!("{SANDBOX_AUTH_BASE}{TOKEN_ENDPOINT_PATH}"),
            None => format!("{PRODUCTION_AUTH_BASE}{TOKEN_ENDPOINT_PATH}"),
        };
        Url::parse(&rendered)
            .map_err(|err| Error::Configuration(format!("invalid token endpoint `{rendered}`: {err}")))
    }
}
