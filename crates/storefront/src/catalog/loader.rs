//! Single-shot background catalog load.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cartwheel_core::{Product, ProductId};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{CatalogClient, CatalogError};

/// Observable outcome of the catalog load.
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// The request has not completed yet.
    Pending,
    /// The request failed; it is not retried.
    Failed(Arc<CatalogError>),
    /// The catalog, in endpoint order.
    Ready(Arc<[Product]>),
}

impl CatalogState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Products when `Ready`.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Self::Ready(products) => Some(products.as_ref()),
            Self::Pending | Self::Failed(_) => None,
        }
    }
}

/// Loads the catalog once and publishes the result.
#[derive(Clone)]
pub struct CatalogLoader {
    inner: Arc<CatalogLoaderInner>,
}

struct CatalogLoaderInner {
    client: CatalogClient,
    state: watch::Sender<CatalogState>,
    started: AtomicBool,
}

impl CatalogLoader {
    /// Create a loader in the `Pending` state. Nothing is fetched until
    /// [`start`](Self::start) is called.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        let (state, _) = watch::channel(CatalogState::Pending);

        Self {
            inner: Arc::new(CatalogLoaderInner {
                client,
                state,
                started: AtomicBool::new(false),
            }),
        }
    }

    /// Spawn the fetch. Only the first call does anything; later calls
    /// return `None`.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return None;
        }

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move { inner.load().await }))
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    /// Wait until the load has either succeeded or failed.
    ///
    /// Never resolves if [`start`](Self::start) was not called or the request
    /// hangs.
    pub async fn settled(&self) -> CatalogState {
        let mut rx = self.inner.state.subscribe();
        let settled = rx
            .wait_for(|state| !state.is_pending())
            .await
            .map(|state| (*state).clone());

        // The sender lives as long as `self`, so the channel cannot close
        settled.unwrap_or_else(|_| self.state())
    }

    /// Look up a product in a `Ready` catalog.
    #[must_use]
    pub fn find_product(&self, id: ProductId) -> Option<Product> {
        self.inner
            .state
            .borrow()
            .products()
            .and_then(|products| products.iter().find(|p| p.id == id))
            .cloned()
    }
}

impl CatalogLoaderInner {
    async fn load(&self) {
        let next = match self.client.fetch_catalog().await {
            Ok(products) => {
                tracing::info!(
                    count = products.len(),
                    endpoint = %self.client.endpoint(),
                    "Catalog loaded"
                );
                CatalogState::Ready(products)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    endpoint = %self.client.endpoint(),
                    "Catalog fetch failed"
                );
                CatalogState::Failed(Arc::new(e))
            }
        };

        self.state.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use axum::http::StatusCode;

    use super::*;
    use crate::catalog::test_support::{PRODUCTS_JSON, serve, unreachable};

    #[tokio::test]
    async fn test_starts_pending() {
        let (config, hits) = serve(StatusCode::OK, PRODUCTS_JSON).await;
        let loader = CatalogLoader::new(CatalogClient::new(&config));

        assert!(loader.state().is_pending());
        assert!(loader.find_product(ProductId::new(1)).is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_becomes_ready() {
        let (config, _) = serve(StatusCode::OK, PRODUCTS_JSON).await;
        let loader = CatalogLoader::new(CatalogClient::new(&config));

        loader.start().expect("first start spawns").await.expect("join");

        let state = loader.settled().await;
        assert!(state.is_ready());
        assert_eq!(state.products().map(<[Product]>::len), Some(2));

        let product = loader.find_product(ProductId::new(2)).expect("product 2");
        assert_eq!(product.title, "Slim Fit T-Shirt");
        assert!(loader.find_product(ProductId::new(3)).is_none());
    }

    #[tokio::test]
    async fn test_start_is_single_shot() {
        let (config, hits) = serve(StatusCode::OK, PRODUCTS_JSON).await;
        let loader = CatalogLoader::new(CatalogClient::new(&config));

        let handle = loader.start().expect("first start spawns");
        assert!(loader.start().is_none());
        handle.await.expect("join");
        assert!(loader.clone().start().is_none());

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        let loader = CatalogLoader::new(CatalogClient::new(&unreachable().await));
        loader.start();

        let state = loader.settled().await;
        assert!(matches!(state, CatalogState::Failed(ref e) if matches!(**e, CatalogError::Network(_))));
        assert!(state.products().is_none());
        assert!(loader.start().is_none());
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let (config, _) = serve(StatusCode::OK, "<html>maintenance</html>").await;
        let loader = CatalogLoader::new(CatalogClient::new(&config));
        loader.start();

        assert!(matches!(
            loader.settled().await,
            CatalogState::Failed(ref e) if matches!(**e, CatalogError::Decode(_))
        ));
    }
}
