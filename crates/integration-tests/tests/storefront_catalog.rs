//! Integration tests for catalog loading and page rendering.
//!
//! Every test boots its own storefront against a stub catalog endpoint.
//!
//! Run with: cargo test -p cartwheel-integration-tests

use axum::http::StatusCode as StubStatus;
use cartwheel_integration_tests::{Catalog, PRODUCTS_JSON, TestContext};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Ready catalog
// ============================================================================

#[tokio::test]
async fn test_ready_catalog_renders_one_tile_per_product() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, PRODUCTS_JSON)).await;

    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert_eq!(body.matches("class=\"product-tile\"").count(), 2);
    assert!(body.contains("Fjallraven Backpack"));
    assert!(body.contains("$109.95"));
    assert!(body.contains("$22.30"));
    assert!(!body.contains("Something went wrong"));
    assert!(!body.contains("role=\"progressbar\""));
}

#[tokio::test]
async fn test_ready_catalog_keeps_endpoint_order() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, PRODUCTS_JSON)).await;

    let body = ctx.get("/").await.text().await.expect("body");
    let first = body.find("Fjallraven Backpack").expect("first product");
    let second = body
        .find("Mens Casual Premium Slim Fit T-Shirts")
        .expect("second product");
    assert!(first < second);
}

#[tokio::test]
async fn test_empty_catalog_renders_empty_grid() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, "[]")).await;

    let body = ctx.get("/").await.text().await.expect("body");
    assert!(!body.contains("class=\"product-tile\""));
    assert!(!body.contains("Something went wrong"));
    assert!(body.contains(">0<"));
}

#[tokio::test]
async fn test_api_products_returns_catalog() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, PRODUCTS_JSON)).await;

    let resp = ctx.get("/api/products").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Value = resp.json().await.expect("json");
    let products = products.as_array().expect("array");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["id"], 1);
    assert_eq!(products[0]["price"], 109.95);
    assert_eq!(products[1]["title"], "Mens Casual Premium Slim Fit T-Shirts");
    // Fields the storefront does not model are dropped
    assert!(products[0].get("rating").is_none());
}

#[tokio::test]
async fn test_readiness_once_loaded() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, PRODUCTS_JSON)).await;

    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/health/ready").await.status(), StatusCode::OK);
}

// ============================================================================
// Failed catalog
// ============================================================================

#[tokio::test]
async fn test_server_error_renders_generic_message() {
    let ctx = TestContext::new(Catalog::Respond(
        StubStatus::INTERNAL_SERVER_ERROR,
        "upstream exploded",
    ))
    .await;

    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert!(body.contains("Something went wrong..."));
    assert!(!body.contains("class=\"product-tile\""));
    assert!(!body.contains("upstream exploded"));
}

#[tokio::test]
async fn test_malformed_body_renders_generic_message() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::OK, r#"{"not": "a list"}"#)).await;

    let body = ctx.get("/").await.text().await.expect("body");
    assert!(body.contains("Something went wrong..."));
    assert!(!body.contains("class=\"product-tile\""));
}

#[tokio::test]
async fn test_api_products_is_bad_gateway_after_failure() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::NOT_FOUND, "")).await;

    let resp = ctx.get("/api/products").await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(resp.text().await.expect("body"), "External service error");

    assert_eq!(
        ctx.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_failure_is_not_retried() {
    let ctx = TestContext::new(Catalog::Respond(StubStatus::SERVICE_UNAVAILABLE, "")).await;

    // A second start is a no-op, so the failure sticks
    assert!(ctx.state.catalog().start().is_none());
    let body = ctx.get("/").await.text().await.expect("body");
    assert!(body.contains("Something went wrong..."));
}

// ============================================================================
// Pending catalog
// ============================================================================

#[tokio::test]
async fn test_pending_catalog_renders_loading_indicator() {
    let ctx = TestContext::new(Catalog::Hang).await;

    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert!(body.contains("role=\"progressbar\""));
    assert!(body.contains("hx-get=\"/shell\""));
    assert!(!body.contains("class=\"product-tile\""));
    assert!(!body.contains("Something went wrong"));
}

#[tokio::test]
async fn test_pending_catalog_endpoints() {
    let ctx = TestContext::new(Catalog::Hang).await;

    assert_eq!(
        ctx.get("/api/products").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        ctx.get("/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);

    let shell = ctx.get("/shell").await.text().await.expect("body");
    assert!(shell.contains("role=\"progressbar\""));
    // The fragment is not a full page
    assert!(!shell.contains("<html"));
}
