//! Cartwheel Core - Shared domain types and cart logic.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. The storefront binary owns the cart value and swaps it
//! for the one returned by each transition.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, and catalog products
//! - [`cart`] - Cart line items and the add/remove reconciliation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLineItem};
pub use types::*;
