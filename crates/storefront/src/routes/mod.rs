//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (product grid + cart panel)
//! GET  /shell                  - Shell fragment (HTMX, polled while loading)
//!
//! # Cart (HTMX fragments, redirect to / without HTMX)
//! POST /cart/add               - Add one unit (form: product_id)
//! POST /cart/remove            - Remove one unit (form: product_id)
//! POST /cart/open              - Open the cart panel
//! POST /cart/close             - Close the cart panel
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # JSON API
//! GET  /api/products           - Loaded catalog (503 pending, 502 failed)
//! GET  /api/cart               - Cart lines
//!
//! # Health
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (catalog loaded)
//! ```

pub mod api;
pub mod cart;
pub mod health;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products))
        .route("/cart", get(api::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/shell", get(home::shell))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/cart", cart_routes())
        .nest("/api", api_routes())
}
