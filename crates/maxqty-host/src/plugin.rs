//! # Max Quantity Plugin
//!
//! Connects the pure policy to the host's extension points.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper: "Add 2 × Mug"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host runs woocommerce_add_to_cart_validation                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_to_cart_validation(passed, 7, 2)                                   │
//! │       │                                                                 │
//! │       ├── ConfigStore::get_option  → "5"   (read fresh every time)      │
//! │       ├── CartService::snapshot    → 4 × Mug already                    │
//! │       ├── ProductCatalog            → "Mug"                             │
//! │       ├── maxqty_core::check_addition → LimitExceeded::Cumulative       │
//! │       └── ErrorReporter::add_error(message)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  false → host skips the addition and shows the notice                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use maxqty_core::{
    advertise_limit, check_addition, insert_limit_field, AvailableVariation, MaxQuantityLimit,
    ProductId, Quantity, QuantityInputArgs, SettingsEntry, MAX_QTY_OPTION_KEY,
};
use tracing::{debug, info, warn};

use crate::collaborators::{CartService, ConfigStore, ErrorReporter, ProductCatalog};
use crate::error::{HostError, HostResult};
use crate::hooks::{ExtensionPoint, Hooks};

/// Entry the host lists in its active plugins when commerce is enabled.
pub const COMMERCE_PLUGIN: &str = "woocommerce/woocommerce.php";

/// Priority of the settings and input-constraint filters.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Priority of the add-to-cart check; runs ahead of default-priority checks.
pub const VALIDATION_PRIORITY: i32 = 1;

/// The plugin: host collaborators plus the callbacks registered with them.
#[derive(Debug)]
pub struct MaxQuantityPlugin<C, S, P, E> {
    config: C,
    cart: S,
    catalog: P,
    errors: E,
}

impl<C, S, P, E> MaxQuantityPlugin<C, S, P, E>
where
    C: ConfigStore,
    S: CartService,
    P: ProductCatalog,
    E: ErrorReporter,
{
    pub fn new(config: C, cart: S, catalog: P, errors: E) -> Self {
        MaxQuantityPlugin {
            config,
            cart,
            catalog,
            errors,
        }
    }

    /// Reads the limit from the settings store.
    ///
    /// Never cached: an administrator may change it between requests. A
    /// stored value that isn't a number is treated as "no limit".
    pub fn current_limit(&self) -> MaxQuantityLimit {
        let Some(raw) = self.config.get_option(MAX_QTY_OPTION_KEY) else {
            return MaxQuantityLimit::unset();
        };

        MaxQuantityLimit::parse_option(&raw).unwrap_or_else(|e| {
            warn!(value = %raw, error = %e, "Ignoring malformed max quantity setting");
            MaxQuantityLimit::unset()
        })
    }

    /// `woocommerce_inventory_settings`: adds the limit field.
    pub fn inventory_settings(&self, entries: Vec<SettingsEntry>) -> Vec<SettingsEntry> {
        insert_limit_field(entries)
    }

    /// `woocommerce_quantity_input_args`: advertises the limit on simple
    /// product quantity inputs.
    pub fn quantity_input_args(&self, args: QuantityInputArgs, _product_id: ProductId) -> QuantityInputArgs {
        advertise_limit(args, self.current_limit())
    }

    /// `woocommerce_available_variation`: advertises the limit on each
    /// variation.
    pub fn available_variation(&self, variation: AvailableVariation) -> AvailableVariation {
        advertise_limit(variation, self.current_limit())
    }

    /// `woocommerce_add_to_cart_validation`: the enforcement point.
    ///
    /// The incoming `passed` flag is replaced by this plugin's own verdict.
    ///
    /// ## Returns
    /// * `true` - The addition may proceed
    /// * `false` - Blocked; the reason was sent to the error reporter
    pub fn add_to_cart_validation(&self, _passed: bool, product_id: ProductId, quantity: Quantity) -> bool {
        let limit = self.current_limit();
        if !limit.is_set() {
            debug!(product_id = %product_id, "No max quantity configured");
            return true;
        }

        let cart = self.cart.snapshot();
        let product_name = self.product_name(product_id);

        match check_addition(&cart, product_id, quantity, limit, &product_name) {
            Ok(()) => {
                debug!(product_id = %product_id, quantity = %quantity, "Addition within max quantity");
                true
            }
            Err(rejection) => {
                info!(
                    product_id = %product_id,
                    quantity = %quantity,
                    limit = rejection.limit(),
                    in_cart = ?rejection.in_cart(),
                    "Addition exceeds max quantity"
                );
                self.errors.add_error(rejection.to_string());
                false
            }
        }
    }

    fn product_name(&self, product_id: ProductId) -> String {
        match self.catalog.get_product(product_id) {
            Some(product) => product.name,
            None => {
                warn!(product_id = %product_id, "Product missing from catalog");
                format!("#{}", product_id)
            }
        }
    }
}

impl<C, S, P, E> MaxQuantityPlugin<C, S, P, E>
where
    C: ConfigStore + 'static,
    S: CartService + 'static,
    P: ProductCatalog + 'static,
    E: ErrorReporter + 'static,
{
    /// Registers every callback with `hooks`.
    pub fn register(self: &Arc<Self>, hooks: &mut Hooks) {
        let plugin = Arc::clone(self);
        hooks.add_inventory_settings_filter(DEFAULT_PRIORITY, move |entries| {
            plugin.inventory_settings(entries)
        });

        let plugin = Arc::clone(self);
        hooks.add_quantity_input_args_filter(DEFAULT_PRIORITY, move |args, product_id| {
            plugin.quantity_input_args(args, product_id)
        });

        let plugin = Arc::clone(self);
        hooks.add_available_variation_filter(DEFAULT_PRIORITY, move |variation| {
            plugin.available_variation(variation)
        });

        let plugin = Arc::clone(self);
        hooks.add_add_to_cart_validation(VALIDATION_PRIORITY, move |passed, product_id, quantity| {
            plugin.add_to_cart_validation(passed, product_id, quantity)
        });

        debug!(callbacks = ExtensionPoint::ALL.len(), "Registered max quantity callbacks");
    }

    /// Registers only when the commerce plugin is among `active_plugins`.
    pub fn register_if_active(self: &Arc<Self>, hooks: &mut Hooks, active_plugins: &[String]) -> HostResult<()> {
        if !active_plugins.iter().any(|p| p == COMMERCE_PLUGIN) {
            return Err(HostError::HostInactive(COMMERCE_PLUGIN.to_string()));
        }

        self.register(hooks);
        info!("Max quantity plugin registered");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
