//! # Cart Quantity Lookup
//!
//! Finds how many of a product the shopper already has in the cart.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart lines (host traversal order)        Association                  │
//! │                                                                         │
//! │  { key: a1, product: 12, qty: 2 }  ──►   12 → 2                        │
//! │  { key: b2, product: -,  qty: 1 }  ──►   (skipped: no product)         │
//! │  { key: c3, product: 40, qty: 1 }  ──►   40 → 1                        │
//! │  { key: d4, product: 12, qty: 5 }  ──►   12 → 5   (overwrites 2)       │
//! │                                                                         │
//! │  quantity_in_cart(cart, 12) = Some(5)                                  │
//! │  quantity_in_cart(cart, 99) = None                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Lines
//! Two lines for the same parent product (two variations of one product, or
//! a malformed host cart) are NOT summed: the later line wins. Host carts keep
//! one line per product + variation, so for simple products this never
//! matters.

use std::collections::HashMap;

use crate::types::{Cart, CartLine, ProductId, Quantity};

/// Returns the quantity of `product_id` already in `cart`, if any.
///
/// Pure read over the snapshot; calling it twice on the same cart gives the
/// same answer.
///
/// ## Example
/// ```rust
/// use maxqty_core::{quantity_in_cart, Cart, CartLine, ProductId};
///
/// let cart = Cart::new("/cart/").with_line(CartLine::new(ProductId::new(12), 2));
///
/// assert_eq!(quantity_in_cart(&cart, ProductId::new(12)), Some(2));
/// assert_eq!(quantity_in_cart(&cart, ProductId::new(99)), None);
/// ```
pub fn quantity_in_cart(cart: &Cart, product_id: ProductId) -> Option<Quantity> {
    let quantities: HashMap<ProductId, Quantity> =
        cart.lines.iter().filter_map(CartLine::keyed_quantity).collect();

    quantities.get(&product_id).copied()
}

// =============================================================================
// Unit Tests
// =============================================================================
