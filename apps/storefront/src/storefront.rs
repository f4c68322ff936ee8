//! # Storefront
//!
//! The in-memory host: settings, cart, catalog and notices, plus the hook
//! registry the plugin attaches to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront                                                             │
//! │                                                                         │
//! │   add_to_cart ──► Hooks::apply_add_to_cart_validation ──► MemoryCart    │
//! │   set_limit ────► validate_limit_input ──► MemoryOptions                │
//! │   quantity_input / variation / settings_page ──► Hooks filters          │
//! │                                                                         │
//! │  The storefront never looks at the limit itself; it only runs hooks.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use maxqty_core::{
    quantity_in_cart, validate_limit_input, AvailableVariation, Cart, MaxQuantityLimit, ProductId,
    Quantity, QuantityInputArgs, SettingsEntry, MAX_QTY_OPTION_KEY,
};
use maxqty_host::memory::{MemoryCart, MemoryCatalog, MemoryOptions, Notice, NoticeLog};
use maxqty_host::{CartService, ExtensionPoint, HostError, Hooks, MaxQuantityPlugin, ProductCatalog};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::StorefrontConfig;
use crate::error::AppError;

type StorePlugin = MaxQuantityPlugin<Arc<MemoryOptions>, MemoryCart, Arc<MemoryCatalog>, Arc<NoticeLog>>;

/// Outcome of an add-to-cart attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartOutcome {
    pub accepted: bool,

    /// Notices raised while validating, joined in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Quantity of the product in the cart after the attempt.
    pub in_cart: Quantity,
}

/// A storefront with the max quantity plugin loaded (when its host is active).
pub struct Storefront {
    options: Arc<MemoryOptions>,
    cart: MemoryCart,
    catalog: Arc<MemoryCatalog>,
    notices: Arc<NoticeLog>,
    plugin: Arc<StorePlugin>,
    hooks: Hooks,
    plugin_active: bool,
}

impl Storefront {
    /// Builds the host services from `config` and registers the plugin.
    ///
    /// An inactive commerce plugin is not fatal: the storefront still runs,
    /// just without any limit.
    pub fn new(config: &StorefrontConfig) -> Self {
        let options = Arc::new(MemoryOptions::new());
        if let Some(limit) = &config.initial_limit {
            options.update_option(MAX_QTY_OPTION_KEY, limit.clone());
        }

        let catalog = Arc::new(MemoryCatalog::new());
        for (id, name) in &config.products {
            catalog.insert(*id, name.clone());
        }

        let cart = MemoryCart::new(config.cart_url.clone());
        let notices = Arc::new(NoticeLog::new());
        let plugin = Arc::new(MaxQuantityPlugin::new(
            Arc::clone(&options),
            cart.clone(),
            Arc::clone(&catalog),
            Arc::clone(&notices),
        ));

        let mut hooks = Hooks::new();
        let plugin_active = match plugin.register_if_active(&mut hooks, &config.active_plugins) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Max quantity plugin not loaded");
                false
            }
        };

        info!(
            products = config.products.len(),
            plugin_active,
            hooks = ?hooks,
            "Storefront ready"
        );

        Storefront {
            options,
            cart,
            catalog,
            notices,
            plugin,
            hooks,
            plugin_active,
        }
    }

    pub fn plugin_active(&self) -> bool {
        self.plugin_active
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Attempts to add `quantity` of a product (or one of its variations).
    ///
    /// Validation is keyed by the parent product, the same as the cart
    /// lookup.
    pub fn add_to_cart(
        &self,
        product_id: ProductId,
        variation_id: Option<ProductId>,
        quantity: Quantity,
    ) -> AddToCartOutcome {
        let accepted = self.hooks.apply_add_to_cart_validation(true, product_id, quantity);

        if accepted {
            self.cart.add(product_id, variation_id, quantity);
        }

        let raised: Vec<String> = self.notices.drain().into_iter().map(|n| n.message).collect();
        let message = (!raised.is_empty()).then(|| raised.join("\n"));

        AddToCartOutcome {
            accepted,
            message,
            in_cart: self.quantity_in_cart(product_id),
        }
    }

    pub fn cart(&self) -> Cart {
        self.cart.snapshot()
    }

    pub fn quantity_in_cart(&self, product_id: ProductId) -> Quantity {
        quantity_in_cart(&self.cart(), product_id).unwrap_or(0)
    }

    pub fn clear_cart(&self) {
        self.cart.clear();
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Saves the limit an administrator typed in. Empty clears it.
    pub fn set_limit(&self, raw: &str) -> Result<MaxQuantityLimit, AppError> {
        let limit = validate_limit_input(raw).map_err(HostError::from)?;

        match limit.get() {
            Some(max) => self.options.update_option(MAX_QTY_OPTION_KEY, max.to_string()),
            None => {
                self.options.delete_option(MAX_QTY_OPTION_KEY);
            }
        }

        info!(limit = ?limit.get(), "Max quantity setting saved");
        Ok(limit)
    }

    /// The limit as the plugin currently sees it.
    pub fn limit(&self) -> MaxQuantityLimit {
        self.plugin.current_limit()
    }

    /// The inventory settings page after every filter ran.
    pub fn settings_page(&self) -> Vec<SettingsEntry> {
        self.hooks.apply_inventory_settings(base_inventory_page())
    }

    // =========================================================================
    // Input Constraints
    // =========================================================================

    pub fn quantity_input(&self, product_id: ProductId) -> QuantityInputArgs {
        self.hooks
            .apply_quantity_input_args(QuantityInputArgs::default(), product_id)
    }

    pub fn variation(&self, variation_id: ProductId) -> AvailableVariation {
        self.hooks
            .apply_available_variation(AvailableVariation::new(variation_id))
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Callbacks registered per extension point, by host name.
    ///
    /// With `name`, reports that point only; an unknown name is an error.
    pub fn registered_hooks(&self, name: Option<&str>) -> Result<Vec<(ExtensionPoint, usize)>, AppError> {
        let points = match name {
            Some(name) => vec![name.parse::<ExtensionPoint>()?],
            None => ExtensionPoint::ALL.to_vec(),
        };

        Ok(points
            .into_iter()
            .map(|point| (point, self.hooks.registered(point)))
            .collect())
    }

    // =========================================================================
    // Catalog & Notices
    // =========================================================================

    pub fn product_name(&self, product_id: ProductId) -> Option<String> {
        self.catalog.get_product(product_id).map(|p| p.name)
    }

    /// Notices raised outside of [`add_to_cart`](Self::add_to_cart).
    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }
}

/// The host's inventory section before any plugin touches it.
fn base_inventory_page() -> Vec<SettingsEntry> {
    let page = json!([
        { "title": "Inventory", "type": "title", "id": "inventory_options" },
        { "title": "Manage stock", "id": "woocommerce_manage_stock", "type": "checkbox", "default": "yes" },
        { "title": "Out of stock threshold", "id": "woocommerce_notify_no_stock_amount", "type": "number", "default": "0" },
        { "type": "sectionend", "id": "inventory_options" },
    ]);

    serde_json::from_value(page).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const MUG: ProductId = ProductId::new(7);

    fn storefront(limit: Option<&str>) -> Storefront {
        let config = StorefrontConfig {
            initial_limit: limit.map(str::to_string),
            ..StorefrontConfig::default()
        };
        Storefront::new(&config)
    }

    #[test]
    fn test_additions_stop_at_limit() {
        let store = storefront(Some("5"));

        assert!(store.add_to_cart(MUG, None, 2).accepted);
        assert!(store.add_to_cart(MUG, None, 2).accepted);

        let blocked = store.add_to_cart(MUG, None, 2);
        assert!(!blocked.accepted);
        assert_eq!(blocked.in_cart, 4);
        assert_eq!(
            blocked.message.as_deref(),
            Some("You can add a maximum of 5 Mug's to <a href=\"/cart/\" title=\"Go to cart\">your cart</a>. You already have 4.")
        );

        assert!(store.add_to_cart(MUG, None, 1).accepted);
        assert_eq!(store.quantity_in_cart(MUG), 5);
    }

    #[test]
    fn test_no_limit_accepts_everything() {
        let store = storefront(None);

        let outcome = store.add_to_cart(MUG, None, 10_000);
        assert!(outcome.accepted);
        assert_eq!(outcome.message, None);
        assert_eq!(outcome.in_cart, 10_000);
    }

    #[test]
    fn test_set_limit_takes_effect_immediately() {
        let store = storefront(None);
        assert!(store.add_to_cart(MUG, None, 3).accepted);

        assert_eq!(store.set_limit("3").unwrap().get(), Some(3));
        assert!(!store.add_to_cart(MUG, None, 1).accepted);

        assert!(!store.set_limit("").unwrap().is_set());
        assert!(store.add_to_cart(MUG, None, 1).accepted);
    }

    #[test]
    fn test_invalid_limit_input_is_rejected_and_kept() {
        let store = storefront(Some("2"));

        let err = store.set_limit("0").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.set_limit("lots").is_err());
        assert_eq!(store.limit().get(), Some(2));
    }

    #[test]
    fn test_inactive_host_loads_no_limit() {
        let config = StorefrontConfig {
            initial_limit: Some("1".to_string()),
            active_plugins: vec![],
            ..StorefrontConfig::default()
        };
        let store = Storefront::new(&config);

        assert!(!store.plugin_active());
        assert!(store.add_to_cart(MUG, None, 5).accepted);
        assert_eq!(store.quantity_input(MUG).max_value, None);
        assert_eq!(store.settings_page().len(), 4);
    }

    #[test]
    fn test_inputs_and_settings_are_filtered() {
        let store = storefront(Some("4"));

        assert_eq!(store.quantity_input(MUG).max_value, Some(4));
        assert_eq!(store.variation(ProductId::new(70)).max_value, Some(4));

        let page = store.settings_page();
        assert_eq!(page.len(), 5);
        assert_eq!(page[3].id.as_deref(), Some(MAX_QTY_OPTION_KEY));
    }

    #[test]
    fn test_registered_hooks_by_name() {
        let store = storefront(None);

        let all = store.registered_hooks(None).unwrap();
        assert_eq!(all.len(), ExtensionPoint::ALL.len());
        assert!(all.iter().all(|(_, count)| *count == 1));

        let one = store.registered_hooks(Some("woocommerce_add_to_cart_validation")).unwrap();
        assert_eq!(one, vec![(ExtensionPoint::AddToCartValidation, 1)]);

        let err = store.registered_hooks(Some("woocommerce_checkout")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_variations_validated_against_parent_line() {
        let store = storefront(Some("3"));

        let blocked = store.add_to_cart(MUG, Some(ProductId::new(70)), 4);
        assert!(blocked.message.unwrap().ends_with("your cart</a>."));

        assert!(store.add_to_cart(MUG, Some(ProductId::new(70)), 2).accepted);
        let blocked = store.add_to_cart(MUG, Some(ProductId::new(71)), 2);
        assert!(!blocked.accepted);
        assert!(blocked.message.unwrap().ends_with("You already have 2."));
    }

    #[test]
    fn test_variation_lines_of_one_parent_are_not_summed() {
        // The later variation line replaces the earlier one in the lookup,
        // so the parent can end up above the limit.
        let store = storefront(Some("3"));

        assert!(store.add_to_cart(MUG, Some(ProductId::new(70)), 2).accepted);
        assert!(store.add_to_cart(MUG, Some(ProductId::new(71)), 1).accepted);
        assert!(store.add_to_cart(MUG, Some(ProductId::new(70)), 1).accepted);

        let total: Quantity = store.cart().lines.iter().filter_map(|l| l.quantity).sum();
        assert_eq!(total, 4);
    }
}
