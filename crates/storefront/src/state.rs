//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogLoader};
use crate::config::StorefrontConfig;
use crate::session::ShopSession;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog loader and the shopper's session. Configuration is only read
/// while building it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogLoader,
    shop: ShopSession,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is not requested until [`CatalogLoader::start`] is called
    /// on [`catalog`](Self::catalog).
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let catalog = CatalogLoader::new(CatalogClient::new(&config.catalog));

        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                shop: ShopSession::new(),
            }),
        }
    }

    /// Get a reference to the catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Get a reference to the shopper's session.
    #[must_use]
    pub fn shop(&self) -> &ShopSession {
        &self.inner.shop
    }
}
