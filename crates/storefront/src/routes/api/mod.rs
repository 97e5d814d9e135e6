//! JSON API for scripts and debugging.
//!
//! Unlike the HTML shell, which only ever shows a generic failure message,
//! these endpoints distinguish a catalog that is still loading (503) from
//! one that failed (502).

use axum::{Json, extract::State};
use cartwheel_core::{Cart, Product};

use crate::catalog::CatalogState;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// The loaded catalog.
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    match state.catalog().state() {
        CatalogState::Ready(products) => Ok(Json(products.to_vec())),
        CatalogState::Pending => Err(AppError::CatalogPending),
        CatalogState::Failed(e) => Err(AppError::Catalog(e)),
    }
}

/// The cart lines: product fields plus `amount`.
pub async fn cart(State(state): State<AppState>) -> Json<Cart> {
    Json(state.shop().snapshot().cart)
}
