//! # Error Types
//!
//! Domain-specific error types for maxqty-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  maxqty-core errors (this file)                                        │
//! │  ├── LimitExceeded    - Routine add-to-cart rejection (user-facing)    │
//! │  └── ValidationError  - Admin input for the limit field is invalid     │
//! │                                                                         │
//! │  maxqty-host errors (separate crate)                                   │
//! │  └── HostError        - Adapter failures                               │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  └── AppError         - What the operator sees (serialized)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. A rejection is a value, never a panic: the `Display` of
//!    [`LimitExceeded`] IS the message shown to the shopper
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Limit Exceeded
// =============================================================================

/// An addition that would push a product past the configured limit.
///
/// The message links to the cart with the same anchor markup the storefront
/// renders in its notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitExceeded {
    /// Some of the product was already in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 4 × Mug, limit 5
    ///      │
    ///      ▼
    /// Shopper adds 2 more
    ///      │
    ///      ▼
    /// Cumulative { limit: 5, in_cart: 4, .. }
    ///      │
    ///      ▼
    /// "You can add a maximum of 5 Mug's to your cart. You already have 4."
    /// ```
    #[error("You can add a maximum of {limit} {product_name}'s to <a href=\"{cart_url}\" title=\"Go to cart\">your cart</a>. You already have {in_cart}.")]
    Cumulative {
        limit: u32,
        product_name: String,
        cart_url: String,
        in_cart: u32,
    },

    /// Nothing of the product was in the cart, but the single addition is
    /// already larger than the limit (the quantity input was bypassed).
    #[error("You can add a maximum of {limit} {product_name}'s to <a href=\"{cart_url}\" title=\"Go to cart\">your cart</a>.")]
    SingleAddition {
        limit: u32,
        product_name: String,
        cart_url: String,
    },
}

impl LimitExceeded {
    /// The limit that was exceeded.
    pub fn limit(&self) -> u32 {
        match self {
            LimitExceeded::Cumulative { limit, .. } | LimitExceeded::SingleAddition { limit, .. } => {
                *limit
            }
        }
    }

    /// Quantity that was already in the cart, if any.
    pub fn in_cart(&self) -> Option<u32> {
        match self {
            LimitExceeded::Cumulative { in_cart, .. } => Some(*in_cart),
            LimitExceeded::SingleAddition { .. } => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for stored or submitted limit values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Invalid format (e.g., letters in a numeric field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },
}

// =============================================================================
// Unit Tests
// =============================================================================
