//! HTTP client for the product listing endpoint.

use std::sync::Arc;

use cartwheel_core::Product;
use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use crate::config::CatalogConfig;

/// Client for the remote catalog.
///
/// Successful responses are cached for the lifetime of the process; there is
/// no expiry and nothing invalidates the entry.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder().max_capacity(1).build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.url.clone(),
                cache,
            }),
        }
    }

    /// The listing endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch the full catalog, serving repeat calls from the cache.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Network` if the endpoint is unreachable,
    /// `CatalogError::Status` on a non-success response, and
    /// `CatalogError::Decode` if the body is not a product array.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_catalog(&self) -> Result<Arc<[Product]>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let products: Arc<[Product]> = self.execute().await?.into();

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Issue the `GET` and decode the body.
    async fn execute(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Decode(e)
        })
    }
}
