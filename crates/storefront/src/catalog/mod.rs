//! Remote product catalog.
//!
//! # Architecture
//!
//! - [`CatalogClient`] issues the `GET` against the listing endpoint with
//!   `reqwest` and keeps the decoded products in a `moka` cache keyed by
//!   [`CacheKey::Products`], so the endpoint is hit at most once per process.
//! - [`CatalogLoader`] runs that fetch once in the background and exposes
//!   the outcome as a [`CatalogState`]: `Pending`, `Failed` or `Ready`.
//!
//! Failures are never retried. A hung request leaves the loader `Pending`.

mod cache;
mod client;
mod loader;

pub use cache::{CacheKey, CacheValue};
pub use client::CatalogClient;
pub use loader::{CatalogLoader, CatalogState};

use thiserror::Error;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The endpoint could not be reached or the body could not be read.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A local stand-in for the catalog endpoint.

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::StatusCode;
    use axum::{Router, routing::get};
    use url::Url;

    use crate::config::CatalogConfig;

    pub const PRODUCTS_JSON: &str = r#"[
        {"id": 1, "title": "Backpack", "price": 109.95, "description": "Fits a laptop",
         "category": "men's clothing", "image": "https://img.example.com/1.jpg",
         "rating": {"rate": 3.9, "count": 120}},
        {"id": 2, "title": "Slim Fit T-Shirt", "price": 22.3, "description": "Cotton",
         "category": "men's clothing", "image": "https://img.example.com/2.jpg"}
    ]"#;

    /// Serve `body` with `status` at `/products`, counting requests.
    pub async fn serve(status: StatusCode, body: &'static str) -> (CatalogConfig, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/products",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { (status, body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub catalog");
        let addr = listener.local_addr().expect("stub catalog address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub catalog server");
        });

        let url = Url::parse(&format!("http://{addr}/products")).expect("stub catalog url");
        (CatalogConfig { url }, hits)
    }

    /// A config pointing at a port nothing listens on.
    pub async fn unreachable() -> CatalogConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/products")).expect("probe url");
        CatalogConfig { url }
    }
}
