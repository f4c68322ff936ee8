//! # Hook Registry
//!
//! A typed model of the host's filter/action mechanism, limited to the
//! extension points this plugin uses.
//!
//! ## Dispatch Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  woocommerce_add_to_cart_validation                                     │
//! │                                                                         │
//! │   priority 1  ──► max quantity check   (passed = true  → false)        │
//! │   priority 10 ──► another plugin       (passed = false → false)        │
//! │   priority 10 ──► registered later     (runs after the one above)      │
//! │                                                                         │
//! │  Lower priority runs first; ties run in registration order. Each       │
//! │  callback receives the previous callback's output.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use maxqty_core::{AvailableVariation, ProductId, Quantity, QuantityInputArgs, SettingsEntry};

use crate::error::HostError;

// =============================================================================
// Extension Points
// =============================================================================

/// The named extension points of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Filters the inventory settings page.
    InventorySettings,
    /// Filters the quantity input arguments of a simple product.
    QuantityInputArgs,
    /// Filters the data of one available variation.
    AvailableVariation,
    /// Decides whether an add-to-cart may proceed.
    AddToCartValidation,
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 4] = [
        ExtensionPoint::InventorySettings,
        ExtensionPoint::QuantityInputArgs,
        ExtensionPoint::AvailableVariation,
        ExtensionPoint::AddToCartValidation,
    ];

    /// The host's name for this extension point.
    pub const fn name(&self) -> &'static str {
        match self {
            ExtensionPoint::InventorySettings => "woocommerce_inventory_settings",
            ExtensionPoint::QuantityInputArgs => "woocommerce_quantity_input_args",
            ExtensionPoint::AvailableVariation => "woocommerce_available_variation",
            ExtensionPoint::AddToCartValidation => "woocommerce_add_to_cart_validation",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtensionPoint {
    type Err = HostError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ExtensionPoint::ALL
            .into_iter()
            .find(|point| point.name() == name)
            .ok_or_else(|| HostError::UnknownExtensionPoint(name.to_string()))
    }
}

// =============================================================================
// Callbacks
// =============================================================================

pub type SettingsFilter = Box<dyn Fn(Vec<SettingsEntry>) -> Vec<SettingsEntry> + Send + Sync>;
pub type QuantityInputFilter = Box<dyn Fn(QuantityInputArgs, ProductId) -> QuantityInputArgs + Send + Sync>;
pub type VariationFilter = Box<dyn Fn(AvailableVariation) -> AvailableVariation + Send + Sync>;
pub type AddToCartCheck = Box<dyn Fn(bool, ProductId, Quantity) -> bool + Send + Sync>;

struct Registered<F> {
    priority: i32,
    callback: F,
}

/// Inserts after every callback with the same or lower priority.
fn insert_by_priority<F>(list: &mut Vec<Registered<F>>, priority: i32, callback: F) {
    let at = list.partition_point(|r| r.priority <= priority);
    list.insert(at, Registered { priority, callback });
}

// =============================================================================
// Registry
// =============================================================================

/// Callbacks registered against each extension point.
///
/// ## Usage
/// ```rust
/// use maxqty_core::ProductId;
/// use maxqty_host::Hooks;
///
/// let mut hooks = Hooks::new();
/// hooks.add_add_to_cart_validation(10, |passed, _id, qty| passed && qty < 100);
///
/// assert!(hooks.apply_add_to_cart_validation(true, ProductId::new(1), 3));
/// assert!(!hooks.apply_add_to_cart_validation(true, ProductId::new(1), 300));
/// ```
#[derive(Default)]
pub struct Hooks {
    inventory_settings: Vec<Registered<SettingsFilter>>,
    quantity_input_args: Vec<Registered<QuantityInputFilter>>,
    available_variation: Vec<Registered<VariationFilter>>,
    add_to_cart_validation: Vec<Registered<AddToCartCheck>>,
}

impl Hooks {
    pub fn new() -> Self {
        Hooks::default()
    }

    pub fn add_inventory_settings_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(Vec<SettingsEntry>) -> Vec<SettingsEntry> + Send + Sync + 'static,
    {
        let filter: SettingsFilter = Box::new(filter);
        insert_by_priority(&mut self.inventory_settings, priority, filter);
    }

    pub fn add_quantity_input_args_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(QuantityInputArgs, ProductId) -> QuantityInputArgs + Send + Sync + 'static,
    {
        let filter: QuantityInputFilter = Box::new(filter);
        insert_by_priority(&mut self.quantity_input_args, priority, filter);
    }

    pub fn add_available_variation_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(AvailableVariation) -> AvailableVariation + Send + Sync + 'static,
    {
        let filter: VariationFilter = Box::new(filter);
        insert_by_priority(&mut self.available_variation, priority, filter);
    }

    pub fn add_add_to_cart_validation<F>(&mut self, priority: i32, check: F)
    where
        F: Fn(bool, ProductId, Quantity) -> bool + Send + Sync + 'static,
    {
        let check: AddToCartCheck = Box::new(check);
        insert_by_priority(&mut self.add_to_cart_validation, priority, check);
    }

    pub fn apply_inventory_settings(&self, entries: Vec<SettingsEntry>) -> Vec<SettingsEntry> {
        self.inventory_settings
            .iter()
            .fold(entries, |entries, r| (r.callback)(entries))
    }

    pub fn apply_quantity_input_args(&self, args: QuantityInputArgs, product_id: ProductId) -> QuantityInputArgs {
        self.quantity_input_args
            .iter()
            .fold(args, |args, r| (r.callback)(args, product_id))
    }

    pub fn apply_available_variation(&self, variation: AvailableVariation) -> AvailableVariation {
        self.available_variation
            .iter()
            .fold(variation, |variation, r| (r.callback)(variation))
    }

    /// Runs every validation callback; `true` means the addition may proceed.
    pub fn apply_add_to_cart_validation(&self, passed: bool, product_id: ProductId, quantity: Quantity) -> bool {
        self.add_to_cart_validation
            .iter()
            .fold(passed, |passed, r| (r.callback)(passed, product_id, quantity))
    }

    /// Number of callbacks registered at `point`.
    pub fn registered(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::InventorySettings => self.inventory_settings.len(),
            ExtensionPoint::QuantityInputArgs => self.quantity_input_args.len(),
            ExtensionPoint::AvailableVariation => self.available_variation.len(),
            ExtensionPoint::AddToCartValidation => self.add_to_cart_validation.len(),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for point in ExtensionPoint::ALL {
            map.entry(&point.name(), &self.registered(point));
        }
        map.finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_extension_point_names_round_trip() {
        for point in ExtensionPoint::ALL {
            assert_eq!(point.name().parse::<ExtensionPoint>().unwrap(), point);
        }
        assert!(matches!(
            "woocommerce_checkout".parse::<ExtensionPoint>(),
            Err(HostError::UnknownExtensionPoint(_))
        ));
    }

    #[test]
    fn test_callbacks_run_by_priority_then_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = Hooks::new();

        for (priority, label) in [(10, "late-a"), (1, "early"), (10, "late-b"), (5, "middle")] {
            let calls = Arc::clone(&calls);
            hooks.add_add_to_cart_validation(priority, move |passed, _, _| {
                calls.lock().unwrap().push(label);
                passed
            });
        }

        assert!(hooks.apply_add_to_cart_validation(true, ProductId::new(1), 1));
        assert_eq!(*calls.lock().unwrap(), vec!["early", "middle", "late-a", "late-b"]);
    }

    #[test]
    fn test_validation_result_threads_through_callbacks() {
        let mut hooks = Hooks::new();
        hooks.add_add_to_cart_validation(1, |_, _, qty| qty <= 2);
        hooks.add_add_to_cart_validation(10, |passed, _, _| passed);

        assert!(hooks.apply_add_to_cart_validation(true, ProductId::new(1), 2));
        assert!(!hooks.apply_add_to_cart_validation(true, ProductId::new(1), 3));
    }

    #[test]
    fn test_empty_registry_passes_values_through() {
        let hooks = Hooks::new();

        assert!(hooks.apply_add_to_cart_validation(true, ProductId::new(1), 1000));
        let args = hooks.apply_quantity_input_args(QuantityInputArgs::default(), ProductId::new(1));
        assert_eq!(args, QuantityInputArgs::default());
        assert_eq!(hooks.registered(ExtensionPoint::InventorySettings), 0);
    }
}
