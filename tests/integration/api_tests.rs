//! Service endpoint tests against the fake upstream

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::support::{config_for, spawn_service, spawn_stack, spawn_upstream, DUE_DATE};

async fn post(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (_upstream, service) = spawn_stack().await;

    let response = Client::new()
        .get(format!("{}/health", service))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_lookup_patron() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/lookup_patron", service),
        json!({"barcode": "12345"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["barcode"], "12345");
    assert_eq!(body["name"], "John Doe");
}

#[tokio::test]
async fn test_lookup_patron_not_found() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/lookup_patron", service),
        json!({"barcode": "99999"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Patron not found. Please check the barcode and try again."
    );
}

#[tokio::test]
async fn test_lookup_patron_upstream_failure() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/lookup_patron", service),
        json!({"barcode": "77777"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An unexpected error occurred.");
}

#[tokio::test]
async fn test_lookup_requires_barcode() {
    let (_upstream, service) = spawn_stack().await;
    let client = Client::new();

    let (status, body) = post(&client, format!("{}/lookup_patron", service), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Patron barcode is required");

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Item barcode is required");
}

#[tokio::test]
async fn test_lookup_item() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/lookup_item", service),
        json!({"barcode": "456"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["barcode"], "456");
    assert_eq!(body["title"], "Book Title B");
    assert_eq!(body["author"], "Author B");
    assert_eq!(body["callNumber"], "BL 123 .M3 2024");
    assert_eq!(body["status"], "Available");
}

#[tokio::test]
async fn test_lookup_item_status_rules() {
    let (_upstream, service) = spawn_stack().await;
    let client = Client::new();

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "321"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Ready");

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "789"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Item is not available for checkout. Status: checked out");

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "000"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Item is not available for checkout. Status: unknown");

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Item not found. Please check the barcode and try again."
    );
}

#[tokio::test]
async fn test_checkout_reports_each_item() {
    let (upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/checkout", service),
        json!({"patronBarcode": "12345", "itemBarcodes": ["123", "nope", "500"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Checkout completed successfully!");

    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["barcode"], "123");
    assert_eq!(results[0]["title"], "Book Title A");
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["dueDate"], DUE_DATE);

    assert_eq!(results[1]["barcode"], "nope");
    assert_eq!(results[1]["title"], "N/A");
    assert_eq!(results[1]["success"], false);
    assert_eq!(results[1]["error"], "Item or patron not found.");

    assert_eq!(results[2]["title"], "Book Title E");
    assert_eq!(results[2]["success"], false);
    assert_eq!(results[2]["error"], "Unexpected error occurred.");

    assert_eq!(
        upstream.state.checkouts(),
        vec![("12345".to_string(), "123".to_string())]
    );
}

#[tokio::test]
async fn test_checkout_unknown_patron() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/checkout", service),
        json!({"patronBarcode": "99999", "itemBarcodes": ["123"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["success"], false);
    assert_eq!(body["results"][0]["error"], "Item or patron not found.");
}

#[tokio::test]
async fn test_checkout_requires_barcodes() {
    let (_upstream, service) = spawn_stack().await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/checkout", service),
        json!({"patronBarcode": "12345", "itemBarcodes": []}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Patron and item barcodes are required");
}

#[tokio::test]
async fn test_null_fields_are_treated_as_missing() {
    let (_upstream, service) = spawn_stack().await;
    let client = Client::new();

    let (status, body) = post(&client, format!("{}/lookup_patron", service), json!({"barcode": null})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Patron barcode is required");
    assert_eq!(body["code"], "BadValue");

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": null})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Item barcode is required");

    let (status, body) = post(
        &client,
        format!("{}/checkout", service),
        json!({"patronBarcode": "12345", "itemBarcodes": null}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Patron and item barcodes are required");
}

#[tokio::test]
async fn test_malformed_body_returns_json_error() {
    let (_upstream, service) = spawn_stack().await;

    let response = Client::new()
        .post(format!("{}/lookup_patron", service))
        .header("content-type", "application/json")
        .body("{\"barcode\": ")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "BadValue");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_access_token_is_reused() {
    let (upstream, service) = spawn_stack().await;
    let client = Client::new();

    for barcode in ["12345", "99999", "12345"] {
        post(&client, format!("{}/lookup_patron", service), json!({"barcode": barcode})).await;
    }
    post(&client, format!("{}/lookup_item", service), json!({"barcode": "123"})).await;

    assert_eq!(upstream.state.token_requests(), 1);
}

#[tokio::test]
async fn test_token_failure_reported() {
    let upstream = spawn_upstream().await;
    let mut config = config_for(&upstream);
    config.library.scope = "denied".to_string();
    let service = spawn_service(config).await;

    let (status, body) = post(
        &Client::new(),
        format!("{}/lookup_patron", service),
        json!({"barcode": "12345"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Access token unavailable");
    assert_eq!(upstream.state.token_requests(), 0);
}

#[tokio::test]
async fn test_rate_limit_returns_json() {
    let upstream = spawn_upstream().await;
    let mut config = config_for(&upstream);
    config.rate_limit.requests_per_minute = 2;
    let service = spawn_service(config).await;
    let client = Client::new();

    for _ in 0..2 {
        let (status, _) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "123"})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = post(&client, format!("{}/lookup_item", service), json!({"barcode": "123"})).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
}
