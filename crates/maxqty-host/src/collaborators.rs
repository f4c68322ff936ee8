//! # Host Collaborators
//!
//! The four services the policy borrows from the storefront host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Trait             Host service             Used for                    │
//! │  ───────────────   ──────────────────────   ─────────────────────────── │
//! │  ConfigStore       key-value settings        the limit, read every call │
//! │  CartService       session cart              snapshot + cart URL        │
//! │  ProductCatalog    products                  display name in messages   │
//! │  ErrorReporter     notices                   showing the rejection      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All four are `Send + Sync` so a plugin holding them can be shared by the
//! hook registry. Implementations for the host's own services live with the
//! host; [`crate::memory`] has in-process versions.

use std::sync::Arc;

use maxqty_core::{Cart, ProductId};
use serde::{Deserialize, Serialize};

/// Read access to the host's key-value settings store.
pub trait ConfigStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never saved.
    fn get_option(&self, key: &str) -> Option<String>;
}

/// The shopper's current cart.
pub trait CartService: Send + Sync {
    /// A consistent copy of the cart, including its URL.
    fn snapshot(&self) -> Cart;
}

/// Product data needed for messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
}

/// Lookup into the host's product catalog.
pub trait ProductCatalog: Send + Sync {
    fn get_product(&self, id: ProductId) -> Option<CatalogProduct>;
}

/// The host channel that shows validation errors to the shopper.
pub trait ErrorReporter: Send + Sync {
    fn add_error(&self, message: String);
}

// =============================================================================
// Shared Handles
// =============================================================================
// The host keeps its own handle to each service while the plugin holds
// another, so Arc<T> forwards to T.

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn get_option(&self, key: &str) -> Option<String> {
        (**self).get_option(key)
    }
}

impl<T: CartService + ?Sized> CartService for Arc<T> {
    fn snapshot(&self) -> Cart {
        (**self).snapshot()
    }
}

impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    fn get_product(&self, id: ProductId) -> Option<CatalogProduct> {
        (**self).get_product(id)
    }
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for Arc<T> {
    fn add_error(&self, message: String) {
        (**self).add_error(message)
    }
}
