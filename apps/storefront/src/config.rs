//! # Storefront Configuration
//!
//! Settings the storefront reads once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MAXQTY_*`)
//! 2. Defaults (this file)
//!
//! The limit itself is NOT configuration of the storefront: `MAXQTY_LIMIT`
//! only seeds the settings store, and the plugin reads the store on every
//! call like any other host would.

use maxqty_core::ProductId;
use maxqty_host::COMMERCE_PLUGIN;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// URL linked from rejection messages.
    pub cart_url: String,

    /// Initial value of the limit option, stored verbatim.
    pub initial_limit: Option<String>,

    /// Host plugins reported as active.
    pub active_plugins: Vec<String>,

    /// Catalog seed: `(id, display name)`.
    pub products: Vec<(ProductId, String)>,
}

impl Default for StorefrontConfig {
    /// Returns a configuration suitable for trying things out.
    ///
    /// ## Default Values
    /// - Cart: "/cart/"
    /// - Limit: unset
    /// - Commerce plugin active
    /// - Catalog: a mug, a poster and a t-shirt
    fn default() -> Self {
        StorefrontConfig {
            cart_url: "/cart/".to_string(),
            initial_limit: None,
            active_plugins: vec![COMMERCE_PLUGIN.to_string()],
            products: vec![
                (ProductId::new(7), "Mug".to_string()),
                (ProductId::new(8), "Poster".to_string()),
                (ProductId::new(9), "T-Shirt".to_string()),
            ],
        }
    }
}

impl StorefrontConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MAXQTY_CART_URL`: Override cart URL
    /// - `MAXQTY_LIMIT`: Seed the limit option (e.g., "5")
    /// - `MAXQTY_ACTIVE_PLUGINS`: Comma-separated active plugin list
    /// - `MAXQTY_PRODUCTS`: Catalog as `id=Name` pairs, comma separated
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StorefrontConfig::default();

        if let Some(cart_url) = lookup("MAXQTY_CART_URL") {
            config.cart_url = cart_url;
        }

        if let Some(limit) = lookup("MAXQTY_LIMIT") {
            config.initial_limit = Some(limit);
        }

        if let Some(plugins) = lookup("MAXQTY_ACTIVE_PLUGINS") {
            config.active_plugins = split_list(&plugins).map(str::to_string).collect();
        }

        if let Some(products) = lookup("MAXQTY_PRODUCTS") {
            config.products = parse_products(&products);
        }

        config
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parses `7=Mug,8=Poster`. Malformed pairs are skipped with a warning.
fn parse_products(raw: &str) -> Vec<(ProductId, String)> {
    split_list(raw)
        .filter_map(|pair| {
            let parsed = pair
                .split_once('=')
                .and_then(|(id, name)| Some((id.trim().parse::<u64>().ok()?, name.trim())))
                .filter(|(id, name)| *id > 0 && !name.is_empty());

            if parsed.is_none() {
                warn!(entry = %pair, "Skipping malformed MAXQTY_PRODUCTS entry");
            }
            parsed.map(|(id, name)| (ProductId::new(id), name.to_string()))
        })
        .collect()
}
