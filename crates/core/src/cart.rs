//! In-memory shopping cart and its quantity reconciliation.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s with at most one line per
//! product. It is never mutated in place: [`Cart::add_to_cart`] and
//! [`Cart::remove_from_cart`] borrow the current cart and return a new one, so
//! whoever owns the cart can detect a change by replacing the value.
//!
//! Per product, a line moves through these states:
//!
//! ```text
//! Absent      --add-->    Present(1)
//! Present(n)  --add-->    Present(n + 1)
//! Present(n)  --remove--> Present(n - 1)   (n > 1)
//! Present(1)  --remove--> Absent
//! Absent      --remove--> Absent           (no-op)
//! ```

use serde::Serialize;

use crate::types::{Price, Product, ProductId};

/// A cart entry: one product and how many units of it are in the cart.
///
/// `amount` is always at least 1. Lines are only created and changed by
/// [`Cart`], which drops a line instead of letting it reach zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    amount: u32,
}

impl CartLineItem {
    const fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// The product this line holds.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Shorthand for `self.product().id`.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units in the cart, never zero.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Unit price times amount.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.amount
    }

    fn incremented(&self) -> Self {
        Self {
            product: self.product.clone(),
            amount: self.amount.saturating_add(1),
        }
    }

    /// `None` when the line would drop to zero.
    fn decremented(&self) -> Option<Self> {
        (self.amount > 1).then(|| Self {
            product: self.product.clone(),
            amount: self.amount - 1,
        })
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Return a cart with one more unit of `product`.
    ///
    /// An existing line for the same id is incremented in place in the
    /// ordering; otherwise a new line with amount 1 is appended. A line
    /// already at `u32::MAX` stays there, so the total grows by exactly one
    /// only below that bound.
    #[must_use]
    pub fn add_to_cart(&self, product: &Product) -> Self {
        if !self.contains(product.id) {
            let mut lines = Vec::with_capacity(self.lines.len() + 1);
            lines.extend(self.lines.iter().cloned());
            lines.push(CartLineItem::new(product.clone()));
            return Self { lines };
        }

        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.id() == product.id {
                    line.incremented()
                } else {
                    line.clone()
                }
            })
            .collect();

        Self { lines }
    }

    /// Return a cart with one fewer unit of `product_id`.
    ///
    /// A line at amount 1 is evicted. An id that is not in the cart leaves it
    /// unchanged.
    #[must_use]
    pub fn remove_from_cart(&self, product_id: ProductId) -> Self {
        let lines = self
            .lines
            .iter()
            .fold(Vec::with_capacity(self.lines.len()), |mut acc, line| {
                if line.id() != product_id {
                    acc.push(line.clone());
                } else if let Some(line) = line.decremented() {
                    acc.push(line);
                }
                acc
            });

        Self { lines }
    }

    /// Sum of amounts across all lines; 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Amount for `product_id`, or `None` if it has no line.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> Option<u32> {
        self.line(product_id).map(CartLineItem::amount)
    }

    /// The product carried by the line for `product_id`.
    #[must_use]
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.line(product_id).map(CartLineItem::product)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in the order they were first added.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.lines.iter()
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id() == product_id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
