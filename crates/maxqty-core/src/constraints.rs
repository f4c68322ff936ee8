//! # Input Constraints
//!
//! Advertises the limit as the maximum of the storefront's quantity inputs.
//!
//! Two kinds of input exist: the quantity box on a simple product page, and
//! the per-variation data the storefront hands to its variation picker. Both
//! get the same treatment: when a limit is set it becomes `max_value`, when
//! it is unset they pass through untouched.
//!
//! This is a courtesy to the shopper, not enforcement. A hand-edited request
//! can carry any quantity; [`crate::validation`] is what actually blocks it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{MaxQuantityLimit, ProductId};

// =============================================================================
// Advertised Maximum
// =============================================================================

/// Anything that exposes a `max_value` to the storefront UI.
pub trait AdvertisedMaximum {
    fn set_max_value(&mut self, max: u32);
}

/// Replaces the advertised maximum with `limit`, when set.
///
/// ## Example
/// ```rust
/// use maxqty_core::{advertise_limit, MaxQuantityLimit, QuantityInputArgs};
///
/// let args = advertise_limit(QuantityInputArgs::default(), MaxQuantityLimit::new(3));
/// assert_eq!(args.max_value, Some(3));
///
/// let args = advertise_limit(QuantityInputArgs::default(), MaxQuantityLimit::unset());
/// assert_eq!(args.max_value, None);
/// ```
pub fn advertise_limit<T: AdvertisedMaximum>(mut target: T, limit: MaxQuantityLimit) -> T {
    if let Some(max) = limit.get() {
        target.set_max_value(max);
    }
    target
}

// =============================================================================
// Simple Products
// =============================================================================

/// Arguments the storefront uses to render a quantity input.
///
/// Fields the policy doesn't care about are kept in `extra` so they survive
/// the round trip through the hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityInputArgs {
    #[serde(default = "default_input_name")]
    pub input_name: String,

    #[serde(default = "default_input_value")]
    pub input_value: u32,

    /// `None` means the input has no upper bound.
    #[serde(default)]
    pub max_value: Option<u32>,

    #[serde(default)]
    pub min_value: u32,

    #[serde(default = "default_step")]
    pub step: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_input_name() -> String {
    "quantity".to_string()
}

fn default_input_value() -> u32 {
    1
}

fn default_step() -> u32 {
    1
}

impl Default for QuantityInputArgs {
    fn default() -> Self {
        QuantityInputArgs {
            input_name: default_input_name(),
            input_value: default_input_value(),
            max_value: None,
            min_value: 0,
            step: default_step(),
            extra: Map::new(),
        }
    }
}

impl AdvertisedMaximum for QuantityInputArgs {
    fn set_max_value(&mut self, max: u32) {
        self.max_value = Some(max);
    }
}

// =============================================================================
// Variations
// =============================================================================

/// Data describing one purchasable variation of a variable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableVariation {
    pub variation_id: ProductId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AvailableVariation {
    pub fn new(variation_id: ProductId) -> Self {
        AvailableVariation {
            variation_id,
            max_value: None,
            extra: Map::new(),
        }
    }
}

impl AdvertisedMaximum for AvailableVariation {
    fn set_max_value(&mut self, max: u32) {
        self.max_value = Some(max);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
