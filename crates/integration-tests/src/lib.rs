//! Integration tests for Cartwheel.
//!
//! Each test boots the storefront router on an ephemeral port, pointed at a
//! stub catalog endpoint served from the same runtime, and talks to it over
//! real HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog load states, page rendering, JSON API
//! - `storefront_cart` - Cart mutations, panel toggling, badge

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use cartwheel_storefront::config::StorefrontConfig;
use cartwheel_storefront::routes;
use cartwheel_storefront::state::AppState;
use url::Url;

/// Two products, the second with no `rating` field.
pub const PRODUCTS_JSON: &str = r#"[
    {"id": 1, "title": "Fjallraven Backpack", "price": 109.95,
     "description": "Your perfect pack for everyday use",
     "category": "men's clothing", "image": "https://img.example.com/1.jpg",
     "rating": {"rate": 3.9, "count": 120}},
    {"id": 2, "title": "Mens Casual Premium Slim Fit T-Shirts", "price": 22.3,
     "description": "Slim-fitting style",
     "category": "men's clothing", "image": "https://img.example.com/2.jpg"}
]"#;

/// A stub catalog endpoint.
pub enum Catalog {
    /// Answer `/products` with this status and body.
    Respond(StatusCode, &'static str),
    /// Accept the request and never answer.
    Hang,
}

/// A running storefront and a client to talk to it.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub state: AppState,
}

impl TestContext {
    /// Boot a storefront against `catalog` and wait for the catalog load to
    /// settle (except for [`Catalog::Hang`], which stays pending).
    pub async fn new(catalog: Catalog) -> Self {
        let settle = !matches!(catalog, Catalog::Hang);
        let catalog_url = spawn_catalog(catalog).await;

        let config = StorefrontConfig::from_lookup(|key| match key {
            "CATALOG_URL" => Some(catalog_url.to_string()),
            _ => None,
        })
        .expect("test config");

        let state = AppState::new(&config);
        state.catalog().start();
        if settle {
            let _ = state.catalog().settled().await;
        }

        let addr = serve(routes::routes().with_state(state.clone())).await;

        // Redirects are asserted on, not followed
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path` and return the response.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// Submit a cart form the way the browser does without HTMX.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// Submit a cart form the way HTMX does.
    pub async fn post_htmx(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("HTMX request")
    }
}

/// Serve `app` on an ephemeral local port.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    addr
}

/// Start a stub catalog endpoint and return its listing URL.
async fn spawn_catalog(catalog: Catalog) -> Url {
    let app = match catalog {
        Catalog::Respond(status, body) => {
            Router::new().route("/products", get(move || async move { (status, body) }))
        }
        Catalog::Hang => Router::new().route(
            "/products",
            get(|| async {
                std::future::pending::<()>().await;
                StatusCode::OK
            }),
        ),
    };

    let addr = serve(app).await;
    Url::parse(&format!("http://{addr}/products")).expect("stub catalog url")
}
