//! Shared scaffolding for the wiremock-backed integration tests.

use std::path::Path;

use digikey::{ClientSettings, Credentials, DigikeyClient};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "test-access-token";

/// A client whose API families and token endpoint all point at the mock
/// server, with the token cache rooted in `storage`.
pub fn client(server: &MockServer, storage: &Path, secret: &str) -> DigikeyClient {
    let base = Url::parse(&server.uri()).unwrap();
    let settings = ClientSettings::new(Credentials::new(CLIENT_ID, secret), storage)
        .sandbox(true)
        .api_base(base.clone())
        .auth_base(base);
    DigikeyClient::with_settings(settings).unwrap()
}

/// Mounts a token endpoint that issues [`ACCESS_TOKEN`] and must be called
/// exactly `expected_calls` times over the test.
pub async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 600,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// A plausible product-details payload for the well-known test part.
pub fn product_details_body() -> serde_json::Value {
    json!({
        "Product": {
            "ManufacturerProductNumber": "SN74LVC1G08DBVR",
            "Description": "IC GATE AND 1CH 2-INP SOT-23-5",
            "UnitPrice": 0.35,
            "QuantityAvailable": 125000,
            "ProductStatus": "Active",
        }
    })
}
