use reqwest::header::{self, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::api::family::ApiFamily;
use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::oauth::{Token, TokenHandler};

/// Header carrying the client identity on every API request.
const CLIENT_ID_HEADER: &str = "X-DIGIKEY-Client-Id";

/// Per-response throttling counters.
const RATE_LIMIT_HEADER: &str = "X-RateLimit-Limit";
const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";

/// Rate-limit telemetry for one call, filled in from the response headers.
///
/// Pass a `&mut` default into any operation to receive it. `None` means the
/// vendor did not report a usable counter; that is never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateLimits {
    pub api_requests_limit: Option<u64>,
    pub api_requests_remaining: Option<u64>,
}

/// HTTP status telemetry for one call.
///
/// Populated on success and on API-level failure alike, so a caller can see
/// the status that accompanied an [`Error::ApiCall`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallStatus {
    pub code: Option<u16>,
}

/// A fully-described vendor operation: everything needed to build the HTTP
/// request. Operations are constructed by [`DigikeyClient`]'s methods, so an
/// invalid operation name cannot be expressed at all.
///
/// [`DigikeyClient`]: crate::DigikeyClient
pub(crate) struct Operation {
    /// Stable name used in logs and error context.
    pub(crate) name: &'static str,
    pub(crate) family: ApiFamily,
    method: Method,
    /// Path relative to the family host (no leading slash).
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl Operation {
    pub(crate) fn get(name: &'static str, family: ApiFamily, path: String) -> Self {
        Self {
            name,
            family,
            method: Method::GET,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn post(
        name: &'static str,
        family: ApiFamily,
        path: String,
        body: serde_json::Value,
    ) -> Self {
        Self {
            name,
            family,
            method: Method::POST,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub(crate) fn query(mut self, key: &'static str, value: String) -> Self {
        self.query.push((key, value));
        self
    }
}

/// One authenticated call to one vendor operation.
///
/// Binding resolves the family host, builds the HTTP client, and acquires a
/// token (which may hit the network); the wrapper then lives for exactly one
/// [`invoke`](Self::invoke). Nothing is shared across calls.
pub(crate) struct DispatchWrapper<'a> {
    settings: &'a ClientSettings,
    http: reqwest::Client,
    token: Token,
    host: Url,
    operation: Operation,
}

impl<'a> DispatchWrapper<'a> {
    /// Prepares one invocation of `operation`. Blocks on the token exchange
    /// when the cache misses; authentication failures surface here, before
    /// the operation itself is ever attempted.
    pub(crate) async fn bind(
        settings: &'a ClientSettings,
        operation: Operation,
    ) -> Result<DispatchWrapper<'a>> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| Error::Unexpected(format!("could not build HTTP client: {err}")))?;

        let token = TokenHandler::new(settings).acquire(&http).await?;
        let host = operation
            .family
            .host(settings.sandbox, settings.api_base.as_ref())?;

        Ok(Self {
            settings,
            http,
            token,
            host,
            operation,
        })
    }

    /// Executes the bound operation and decomposes its raw response.
    ///
    /// The client-id and authorization headers are appended automatically.
    /// Rate-limit and status telemetry are extracted into the caller's sinks
    /// best-effort; a non-success status becomes [`Error::ApiCall`] after
    /// the status sink has been filled in.
    pub(crate) async fn invoke<T: DeserializeOwned>(
        self,
        limits: Option<&mut RateLimits>,
        status: Option<&mut CallStatus>,
    ) -> Result<T> {
        let url = self.host.join(&self.operation.path).map_err(|err| {
            Error::Unexpected(format!(
                "{}: could not build request URL: {err}",
                self.operation.name
            ))
        })?;

        debug!(operation = self.operation.name, %url, "dispatching API call");
        let mut request = self
            .http
            .request(self.operation.method.clone(), url)
            .header(CLIENT_ID_HEADER, &self.settings.credentials.client_id)
            .header(header::AUTHORIZATION, self.token.authorization());
        if !self.operation.query.is_empty() {
            request = request.query(&self.operation.query);
        }
        if let Some(body) = &self.operation.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            error!(operation = self.operation.name, error = %err, "transport failure");
            if err.is_timeout() {
                Error::Timeout(format!("{}: {err}", self.operation.name))
            } else {
                Error::Unexpected(format!("{}: {err}", self.operation.name))
            }
        })?;

        // Telemetry first: both extractions are independent of the call's
        // outcome and must run before any error propagates.
        extract_rate_limits(response.headers(), limits);
        let code = response.status();
        record_status(code, status);

        if !code.is_success() {
            error!(
                operation = self.operation.name,
                status = code.as_u16(),
                "API call failed"
            );
            return Err(Error::ApiCall {
                status: code.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|err| {
            error!(operation = self.operation.name, error = %err, "undecodable payload");
            Error::Unexpected(format!(
                "{}: undecodable payload: {err}",
                self.operation.name
            ))
        })
    }
}

/// Best-effort extraction: absent or malformed counters degrade to unknown
/// values in the sink, never to a failure.
fn extract_rate_limits(headers: &HeaderMap, sink: Option<&mut RateLimits>) {
    let limit = header_u64(headers, RATE_LIMIT_HEADER);
    let remaining = header_u64(headers, RATE_LIMIT_REMAINING_HEADER);

    match (limit, remaining) {
        (Some(limit), Some(remaining)) => {
            debug!("requests remaining: [{remaining}/{limit}]");
        }
        _ => debug!("no api limits returned"),
    }

    if let Some(sink) = sink {
        sink.api_requests_limit = limit;
        sink.api_requests_remaining = remaining;
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

fn record_status(code: StatusCode, sink: Option<&mut CallStatus>) {
    debug!("API returned code: {}", code.as_u16());
    if let Some(sink) = sink {
        sink.code = Some(code.as_u16());
    }
}
