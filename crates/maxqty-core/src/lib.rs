//! # maxqty-core: Pure Max-Quantity Policy
//!
//! This crate decides whether a shopper may add more of a product to the
//! cart when the store enforces one global per-product maximum. Everything
//! here is a pure function over values handed in by the caller.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Max Quantity Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host Storefront                              │   │
//! │  │   Settings page ──► Product page ──► Add to cart ──► Cart       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ extension points                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    maxqty-host (adapter)                        │   │
//! │  │   reads option, snapshots cart, looks up product name           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ maxqty-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌────────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │  lookup  │  │ validation │  │ constraints │  │ settings │  │   │
//! │  │   │ in cart  │  │  accept /  │  │  max_value  │  │  field + │  │   │
//! │  │   │  qty     │  │  reject    │  │  advertised │  │  parsing │  │   │
//! │  │   └──────────┘  └────────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart snapshot, limit and result types
//! - [`lookup`] - Quantity of a product already in the cart
//! - [`validation`] - The add-to-cart decision
//! - [`constraints`] - Advertised maximum on quantity inputs
//! - [`settings`] - The admin settings field and its input validation
//! - [`error`] - Rejection and validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use maxqty_core::{validate_add_to_cart, Cart, CartLine, MaxQuantityLimit, ProductId};
//!
//! let cart = Cart::new("/cart/").with_line(CartLine::new(ProductId::new(7), 4));
//! let limit = MaxQuantityLimit::new(5);
//!
//! assert!(validate_add_to_cart(&cart, ProductId::new(7), 1, limit, "Mug").accepted);
//!
//! let rejected = validate_add_to_cart(&cart, ProductId::new(7), 2, limit, "Mug");
//! assert!(!rejected.accepted);
//! assert!(rejected.message.unwrap().contains("You already have 4."));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod constraints;
pub mod error;
pub mod lookup;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use constraints::{advertise_limit, AdvertisedMaximum, AvailableVariation, QuantityInputArgs};
pub use error::{LimitExceeded, ValidationError};
pub use lookup::quantity_in_cart;
pub use settings::{insert_limit_field, validate_limit_input, SettingsEntry};
pub use types::*;
pub use validation::{check_addition, validate_add_to_cart};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Settings-store key holding the limit.
///
/// Stored values are string-encoded integers; an empty value means no limit.
pub const MAX_QTY_OPTION_KEY: &str = "isa_woocommerce_max_qty_limit";
