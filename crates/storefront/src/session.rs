//! The shopper's session: cart contents and cart panel visibility.
//!
//! There is one session per process. It lives in memory only and starts
//! over (empty cart, closed panel) when the process restarts.
//!
//! The current [`ShopState`] sits in a `watch` channel. Every transition
//! builds a new value from the current one and replaces it, which both
//! serializes concurrent requests and wakes anything holding a receiver
//! from [`ShopSession::subscribe`].

use cartwheel_core::{Cart, Product, ProductId};
use tokio::sync::watch;

/// Everything the shell renders besides the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopState {
    pub cart: Cart,
    pub panel_open: bool,
}

/// Owner of the session's [`ShopState`].
pub struct ShopSession {
    state: watch::Sender<ShopState>,
}

impl Default for ShopSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopSession {
    /// Empty cart, panel closed.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ShopState::default());
        Self { state }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> ShopState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ShopState> {
        self.state.subscribe()
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&self, product: &Product) -> ShopState {
        self.transition(|current| ShopState {
            cart: current.cart.add_to_cart(product),
            panel_open: current.panel_open,
        })
    }

    /// Remove one unit of `product_id`; a no-op if it is not in the cart.
    pub fn remove_from_cart(&self, product_id: ProductId) -> ShopState {
        self.transition(|current| ShopState {
            cart: current.cart.remove_from_cart(product_id),
            panel_open: current.panel_open,
        })
    }

    pub fn open_panel(&self) -> ShopState {
        self.set_panel(true)
    }

    pub fn close_panel(&self) -> ShopState {
        self.set_panel(false)
    }

    fn set_panel(&self, panel_open: bool) -> ShopState {
        self.transition(|current| ShopState {
            cart: current.cart.clone(),
            panel_open,
        })
    }

    /// Replace the stored state with `next(current)` and return the new value.
    fn transition(&self, next: impl FnOnce(&ShopState) -> ShopState) -> ShopState {
        let mut replaced = ShopState::default();
        self.state.send_modify(|current| {
            *current = next(current);
            replaced = current.clone();
        });
        replaced
    }
}
