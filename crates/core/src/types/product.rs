//! Catalog products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable product as returned by the catalog endpoint.
///
/// Immutable once fetched. Unknown JSON fields (such as `rating`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within one catalog snapshot.
    pub id: ProductId,
    pub category: String,
    pub description: String,
    /// Absolute URL of the product image.
    pub image: String,
    /// Unit price.
    pub price: Price,
    pub title: String,
}
