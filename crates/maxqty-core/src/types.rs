//! # Domain Types
//!
//! Core domain types used throughout the max-quantity policy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐      │
//! │  │      Cart       │   │    CartLine     │   │ MaxQuantityLimit │      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │      │
//! │  │  url            │──►│  key            │   │  Option<u32>     │      │
//! │  │  lines          │   │  product_id?    │   │  None = unset    │      │
//! │  └─────────────────┘   │  variation_id?  │   └──────────────────┘      │
//! │                        │  quantity?      │                              │
//! │                        └─────────────────┘   ┌──────────────────┐      │
//! │                                              │ ValidationResult │      │
//! │                                              │  accepted        │      │
//! │                                              │  message?        │      │
//! │                                              └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The cart belongs to the host. These types are read-only snapshots of it;
//! nothing in this crate writes back.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{LimitExceeded, ValidationError};

/// A quantity of one product.
pub type Quantity = u32;

// =============================================================================
// Product ID
// =============================================================================

/// Catalog identifier of a product.
///
/// Variation lines are keyed by their parent product. The lookup keeps only
/// the last line per product, so two variations of one product are not
/// summed against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The host uses 0 for "no product".
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry of the host cart.
///
/// ## Malformed Lines
/// The host hands lines over as loosely-typed records. A line without a
/// product id or without a quantity is kept here as-is and simply ignored by
/// [`crate::lookup::quantity_in_cart`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Host cart item key (unique per product + variation + options).
    #[serde(default)]
    pub key: String,

    /// Parent product id.
    #[serde(default)]
    pub product_id: Option<ProductId>,

    /// Variation id, for products with variations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub variation_id: Option<ProductId>,

    /// Quantity on this line.
    #[serde(default)]
    pub quantity: Option<Quantity>,
}

impl CartLine {
    /// Creates a well-formed line for a simple product.
    pub fn new(product_id: ProductId, quantity: Quantity) -> Self {
        CartLine {
            key: String::new(),
            product_id: Some(product_id),
            variation_id: None,
            quantity: Some(quantity),
        }
    }

    /// Sets the host cart item key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Marks this line as a variation of its product.
    pub fn with_variation(mut self, variation_id: ProductId) -> Self {
        self.variation_id = Some(variation_id);
        self
    }

    /// Returns `(product_id, quantity)` when both are present and non-zero.
    pub fn keyed_quantity(&self) -> Option<(ProductId, Quantity)> {
        match (self.product_id, self.quantity) {
            (Some(id), Some(qty)) if !id.is_zero() && qty > 0 => Some((id, qty)),
            _ => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Snapshot of the host cart at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Where the shopper can view the cart; linked from rejection messages.
    #[serde(default)]
    pub url: String,

    /// Lines in host traversal order.
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart snapshot.
    pub fn new(url: impl Into<String>) -> Self {
        Cart {
            url: url.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a line (builder style, handy in tests and fixtures).
    pub fn with_line(mut self, line: CartLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Max Quantity Limit
// =============================================================================

/// The global per-product limit, or "unset".
///
/// ## Invariant
/// A set limit is always at least 1. Zero can't be represented: the
/// constructors fold it into "unset", the same way the settings store treats
/// `"0"` as empty. Deserializing goes through [`MaxQuantityLimit::new`] too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(from = "Option<u32>")]
#[ts(export)]
pub struct MaxQuantityLimit(Option<u32>);

impl From<Option<u32>> for MaxQuantityLimit {
    fn from(max: Option<u32>) -> Self {
        max.map_or(MaxQuantityLimit::unset(), MaxQuantityLimit::new)
    }
}

impl MaxQuantityLimit {
    /// No limit configured; every addition is accepted.
    #[inline]
    pub const fn unset() -> Self {
        MaxQuantityLimit(None)
    }

    /// A limit of `max` per product. Zero means unset.
    #[inline]
    pub const fn new(max: u32) -> Self {
        if max == 0 {
            MaxQuantityLimit(None)
        } else {
            MaxQuantityLimit(Some(max))
        }
    }

    /// Parses the raw settings-store value.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Empty and `"0"` mean unset
    /// - Anything else must be a whole number that fits in `u32`
    ///
    /// ## Example
    /// ```rust
    /// use maxqty_core::MaxQuantityLimit;
    ///
    /// assert_eq!(MaxQuantityLimit::parse_option(" 5 ").unwrap().get(), Some(5));
    /// assert!(!MaxQuantityLimit::parse_option("").unwrap().is_set());
    /// assert!(MaxQuantityLimit::parse_option("five").is_err());
    /// ```
    pub fn parse_option(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Ok(MaxQuantityLimit::unset());
        }

        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "max quantity".to_string(),
                reason: "must be a whole number".to_string(),
            });
        }

        raw.parse::<u32>()
            .map(MaxQuantityLimit::new)
            .map_err(|_| ValidationError::OutOfRange {
                field: "max quantity".to_string(),
                min: 1,
                max: u32::MAX as u64,
            })
    }

    /// Returns the limit, if set.
    #[inline]
    pub const fn get(&self) -> Option<u32> {
        self.0
    }

    /// Checks if a limit is configured.
    #[inline]
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of one add-to-cart validation.
///
/// Produced fresh per call and never stored. A rejection always carries the
/// message to surface to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    pub accepted: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    /// The addition may proceed.
    pub fn accept() -> Self {
        ValidationResult {
            accepted: true,
            message: None,
        }
    }

    /// The addition must be blocked, with `reason` shown to the shopper.
    pub fn reject(reason: &LimitExceeded) -> Self {
        ValidationResult {
            accepted: false,
            message: Some(reason.to_string()),
        }
    }
}

impl From<Result<(), LimitExceeded>> for ValidationResult {
    fn from(result: Result<(), LimitExceeded>) -> Self {
        match result {
            Ok(()) => ValidationResult::accept(),
            Err(reason) => ValidationResult::reject(&reason),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_zero_is_unset() {
        assert!(!MaxQuantityLimit::new(0).is_set());
        assert_eq!(MaxQuantityLimit::new(3).get(), Some(3));
        assert_eq!(MaxQuantityLimit::default(), MaxQuantityLimit::unset());
    }

    #[test]
    fn test_deserialized_zero_limit_is_unset() {
        let zero: MaxQuantityLimit = serde_json::from_str("0").unwrap();
        assert!(!zero.is_set());

        let null: MaxQuantityLimit = serde_json::from_str("null").unwrap();
        assert!(!null.is_set());

        let five: MaxQuantityLimit = serde_json::from_str("5").unwrap();
        assert_eq!(five.get(), Some(5));
        assert_eq!(serde_json::to_string(&five).unwrap(), "5");

        let cart = Cart::new("/cart/");
        assert!(crate::validate_add_to_cart(&cart, ProductId::new(7), 1, zero, "Mug").accepted);
    }

    #[test]
    fn test_cart_line_omits_missing_variation() {
        let line = CartLine::new(ProductId::new(7), 2).with_key("a1");
        let value = serde_json::to_value(&line).unwrap();

        assert!(value.get("variation_id").is_none());
        assert_eq!(value["product_id"], serde_json::json!(7));
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(MaxQuantityLimit::parse_option("12").unwrap().get(), Some(12));
        assert_eq!(MaxQuantityLimit::parse_option("  7\n").unwrap().get(), Some(7));
        assert!(!MaxQuantityLimit::parse_option("0").unwrap().is_set());
        assert!(!MaxQuantityLimit::parse_option("   ").unwrap().is_set());

        assert!(matches!(
            MaxQuantityLimit::parse_option("-3"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            MaxQuantityLimit::parse_option("2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            MaxQuantityLimit::parse_option("99999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_keyed_quantity_skips_malformed_lines() {
        assert_eq!(
            CartLine::new(ProductId::new(4), 2).keyed_quantity(),
            Some((ProductId::new(4), 2))
        );

        let no_product = CartLine {
            quantity: Some(2),
            ..CartLine::default()
        };
        assert_eq!(no_product.keyed_quantity(), None);

        let no_quantity = CartLine {
            product_id: Some(ProductId::new(4)),
            ..CartLine::default()
        };
        assert_eq!(no_quantity.keyed_quantity(), None);

        assert_eq!(CartLine::new(ProductId::new(0), 2).keyed_quantity(), None);
        assert_eq!(CartLine::new(ProductId::new(4), 0).keyed_quantity(), None);
    }

    #[test]
    fn test_cart_line_from_host_json() {
        let line: CartLine = serde_json::from_str(
            r#"{"key":"a1b2","product_id":31,"variation_id":33,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(line.product_id, Some(ProductId::new(31)));
        assert_eq!(line.variation_id, Some(ProductId::new(33)));
        assert_eq!(line.quantity, Some(2));

        let malformed: CartLine = serde_json::from_str(r#"{"key":"c3"}"#).unwrap();
        assert_eq!(malformed.keyed_quantity(), None);
    }

    #[test]
    fn test_validation_result_from_result() {
        assert_eq!(ValidationResult::from(Ok(())), ValidationResult::accept());

        let rejected = ValidationResult::from(Err(LimitExceeded::SingleAddition {
            limit: 1,
            product_name: "Hat".to_string(),
            cart_url: "/cart/".to_string(),
        }));
        assert!(!rejected.accepted);
        assert!(rejected.message.unwrap().contains("Hat's"));
    }
}
