//! Cart route handlers.
//!
//! Every control is a plain `<form method="post">` that HTMX upgrades with
//! `hx-post`. HTMX requests get the re-rendered shell plus an
//! `HX-Trigger-After-Settle: cart-updated` header, which the swapped-in cart
//! badge listens for to refresh itself from `/cart/count`; plain form posts
//! are redirected back to `/`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use cartwheel_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use super::home::{ShellTemplate, ShellView};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::session::ShopState;
use crate::state::AppState;

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Answer a cart mutation.
fn respond(state: &AppState, headers: &HeaderMap, shop: &ShopState) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/").into_response();
    }

    let shell = ShellView::new(&state.catalog().state(), shop);
    (
        AppendHeaders([("HX-Trigger-After-Settle", "cart-updated")]),
        ShellTemplate { shell },
    )
        .into_response()
}

/// Add one unit of a product to the cart.
///
/// The product is taken from the loaded catalog, or from its existing cart
/// line so the panel's "+" control keeps working regardless of the catalog.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find_product(form.product_id)
        .or_else(|| state.shop().snapshot().cart.product(form.product_id).cloned())
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let shop = state.shop().add_to_cart(&product);

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    tracing::debug!(
        product_id = %form.product_id,
        item_count = shop.cart.total_item_count(),
        "Added to cart"
    );

    Ok(respond(&state, &headers, &shop))
}

/// Remove one unit of a product from the cart.
///
/// Unknown ids leave the cart unchanged.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartItemForm>,
) -> Response {
    let shop = state.shop().remove_from_cart(form.product_id);

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::debug!(
        product_id = %form.product_id,
        item_count = shop.cart.total_item_count(),
        "Removed from cart"
    );

    respond(&state, &headers, &shop)
}

/// Open the cart panel.
pub async fn open(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let shop = state.shop().open_panel();
    respond(&state, &headers, &shop)
}

/// Close the cart panel.
pub async fn close(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let shop = state.shop().close_panel();
    respond(&state, &headers, &shop)
}

/// Cart count badge (HTMX).
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.shop().snapshot().cart.total_item_count(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));

        headers.insert("hx-request", HeaderValue::from_static("false"));
        assert!(!is_htmx(&headers));
    }

    #[test]
    fn test_count_badge_renders_number() {
        let html = CartCountTemplate { count: 12 }.render().expect("render");
        assert!(html.contains(">12<"));
    }

    #[test]
    fn test_count_badge_refreshes_on_cart_updated() {
        let html = CartCountTemplate { count: 0 }.render().expect("render");
        assert!(html.contains("hx-get=\"/cart/count\""));
        assert!(html.contains("hx-trigger=\"cart-updated from:body\""));
        assert!(html.contains("hx-swap=\"outerHTML\""));
    }
}
