//! Home page and shell fragment.
//!
//! The shell is everything under `<main id="shell">`: the cart button with
//! its badge, the catalog grid (or its loading/failure status) and the cart
//! panel. It is a pure function of the catalog state and the shop state, so
//! every cart handler answers HTMX requests by re-rendering it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use cartwheel_core::{Cart, CartLineItem, Product};

use crate::catalog::CatalogState;
use crate::filters;
use crate::session::ShopState;
use crate::state::AppState;

/// Product tile display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price.display(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub price: String,
    pub line_price: String,
    pub amount: u32,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        let product = line.product();
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price.display(),
            line_price: line.line_total().display(),
            amount: line.amount(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.total_item_count(),
        }
    }
}

/// Which branch of the catalog area to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Pending,
    Failed,
    Ready,
}

/// Shell display data for templates.
#[derive(Clone)]
pub struct ShellView {
    pub status: CatalogStatus,
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub panel_open: bool,
}

impl ShellView {
    /// Build the shell from the two pieces of state it renders.
    #[must_use]
    pub fn new(catalog: &CatalogState, shop: &ShopState) -> Self {
        let (status, products) = match catalog {
            CatalogState::Pending => (CatalogStatus::Pending, Vec::new()),
            CatalogState::Failed(_) => (CatalogStatus::Failed, Vec::new()),
            CatalogState::Ready(products) => (
                CatalogStatus::Ready,
                products.iter().map(ProductView::from).collect(),
            ),
        };

        Self {
            status,
            products,
            cart: CartView::from(&shop.cart),
            panel_open: shop.panel_open,
        }
    }

    /// Build the shell from the current application state.
    #[must_use]
    pub fn current(state: &AppState) -> Self {
        Self::new(&state.catalog().state(), &state.shop().snapshot())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == CatalogStatus::Pending
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == CatalogStatus::Failed
    }
}

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub shell: ShellView,
}

/// Shell fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/shell.html")]
pub struct ShellTemplate {
    pub shell: ShellView,
}

/// Display the storefront.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        shell: ShellView::current(&state),
    }
}

/// Display the shell fragment.
///
/// Polled by the loading indicator until the catalog settles.
pub async fn shell(State(state): State<AppState>) -> impl IntoResponse {
    ShellTemplate {
        shell: ShellView::current(&state),
    }
}
