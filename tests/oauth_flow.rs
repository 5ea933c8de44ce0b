//! Token acquisition, caching, and failure behavior, end to end against a
//! mock authorization endpoint.

mod common;

use common::{client, mount_token_endpoint, product_details_body, ACCESS_TOKEN, CLIENT_SECRET};
use digikey::Error;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAILS_PATH: &str = "/products/v4/search/296-24647-1-ND/productdetails";

#[tokio::test]
async fn cache_miss_performs_exactly_one_exchange_and_persists_one_record() {
    let server = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();

    mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_details_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, storage.path(), CLIENT_SECRET);
    let details = client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap();
    assert!(details.product.is_some());

    // Exactly one record on disk, holding the issued token.
    let record_path = storage.path().join("sandbox_token_storage.json");
    let record = std::fs::read_to_string(record_path).unwrap();
    assert!(record.contains(ACCESS_TOKEN));
    assert_eq!(std::fs::read_dir(storage.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn cached_token_skips_the_exchange() {
    let server = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();

    // One exchange allowed in total, across two API calls.
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_details_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server, storage.path(), CLIENT_SECRET);
    client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap();
    client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_cached_token_triggers_a_refresh() {
    let server = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();

    // Seed the cache with a long-expired record for the same client.
    std::fs::write(
        storage.path().join("sandbox_token_storage.json"),
        serde_json::json!({
            "client_id": common::CLIENT_ID,
            "sandbox": true,
            "token": {
                "access_token": "stale-token",
                "token_type": "Bearer",
                "expires_at": 1,
            }
        })
        .to_string(),
    )
    .unwrap();

    mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .and(header("Authorization", format!("Bearer {ACCESS_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_details_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, storage.path(), CLIENT_SECRET);
    client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap();

    let record =
        std::fs::read_to_string(storage.path().join("sandbox_token_storage.json")).unwrap();
    assert!(record.contains(ACCESS_TOKEN));
    assert!(!record.contains("stale-token"));
}

#[tokio::test]
async fn exchange_sends_the_client_credentials_grant() {
    let server = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 600,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_details_body()))
        .mount(&server)
        .await;

    let client = client(&server, storage.path(), CLIENT_SECRET);
    client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_credentials_surface_as_authentication_and_persist_nothing() {
    let server = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "invalid_client"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, storage.path(), "wrong-secret");
    let error = client
        .product_details("296-24647-1-ND", None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Authentication(_)));
    // A failed exchange must not leave a token record behind.
    assert_eq!(std::fs::read_dir(storage.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_credentials_fail_before_any_network_io() {
    let storage = tempfile::tempdir().unwrap();
    let error = digikey::DigikeyClient::new("", "secret", storage.path(), true).unwrap_err();
    assert!(matches!(error, Error::Configuration(_)));
}
