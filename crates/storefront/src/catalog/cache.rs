//! Cache types for catalog responses.

use std::sync::Arc;

use cartwheel_core::Product;

/// Cache key for catalog responses.
///
/// The listing endpoint takes no parameters, so one logical query identity
/// covers the whole catalog.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<[Product]>),
}
