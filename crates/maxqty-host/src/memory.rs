//! # In-Memory Collaborators
//!
//! Process-local implementations of the host services, used by the
//! storefront app and by tests.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryOptions   RwLock<HashMap>   many readers, rare admin writes     │
//! │  MemoryCart      Arc<Mutex<Cart>>  every add mutates                   │
//! │  MemoryCatalog   RwLock<HashMap>   seeded once, read per rejection     │
//! │  NoticeLog       Mutex<Vec>        append + drain                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The validator only ever sees `MemoryCart::snapshot()`, a clone taken under
//! the lock, so no lock is held while it decides.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use maxqty_core::{Cart, CartLine, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::collaborators::{CartService, CatalogProduct, ConfigStore, ErrorReporter, ProductCatalog};

// =============================================================================
// Options
// =============================================================================

/// Key-value settings store.
#[derive(Debug, Default)]
pub struct MemoryOptions {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        MemoryOptions::default()
    }

    /// Saves `value` under `key`, replacing any previous value.
    pub fn update_option(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!(key = %key, value = %value, "Updating option");
        self.values
            .write()
            .expect("Options lock poisoned")
            .insert(key.to_string(), value);
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete_option(&self, key: &str) -> bool {
        self.values
            .write()
            .expect("Options lock poisoned")
            .remove(key)
            .is_some()
    }
}

impl ConfigStore for MemoryOptions {
    fn get_option(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .expect("Options lock poisoned")
            .get(key)
            .cloned()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session cart.
///
/// ## Invariants
/// - One line per product + variation (adding again increases its quantity)
/// - Every line gets a fresh UUID key
#[derive(Debug, Clone)]
pub struct MemoryCart {
    cart: Arc<Mutex<Cart>>,
}

impl MemoryCart {
    /// Creates an empty cart reachable at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        MemoryCart {
            cart: Arc::new(Mutex::new(Cart::new(url))),
        }
    }

    /// Adds `quantity` of a product (or one of its variations).
    pub fn add(&self, product_id: ProductId, variation_id: Option<ProductId>, quantity: Quantity) {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");

        let existing = cart
            .lines
            .iter_mut()
            .find(|line| line.product_id == Some(product_id) && line.variation_id == variation_id);

        if let Some(line) = existing {
            let in_line = line.quantity.unwrap_or(0);
            line.quantity = Some(in_line.saturating_add(quantity));
            debug!(product_id = %product_id, quantity = ?line.quantity, "Increased cart line");
            return;
        }

        let mut line = CartLine::new(product_id, quantity).with_key(Uuid::new_v4().to_string());
        line.variation_id = variation_id;
        cart.lines.push(line);
        debug!(product_id = %product_id, quantity = %quantity, "Added cart line");
    }

    /// Appends a line exactly as given, bypassing the one-line-per-item rule.
    ///
    /// Lets a host load a cart it restored from elsewhere, malformed lines
    /// included.
    pub fn push_raw(&self, line: CartLine) {
        self.cart.lock().expect("Cart mutex poisoned").lines.push(line);
    }

    /// Empties the cart.
    pub fn clear(&self) {
        self.cart.lock().expect("Cart mutex poisoned").lines.clear();
    }
}

impl CartService for MemoryCart {
    fn snapshot(&self) -> Cart {
        self.cart.lock().expect("Cart mutex poisoned").clone()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Product catalog.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    pub fn insert(&self, id: ProductId, name: impl Into<String>) {
        let product = CatalogProduct {
            id,
            name: name.into(),
        };
        self.products
            .write()
            .expect("Catalog lock poisoned")
            .insert(id, product);
    }
}

impl ProductCatalog for MemoryCatalog {
    fn get_product(&self, id: ProductId) -> Option<CatalogProduct> {
        self.products
            .read()
            .expect("Catalog lock poisoned")
            .get(&id)
            .cloned()
    }
}

// =============================================================================
// Notices
// =============================================================================

/// An error shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Error notices waiting to be shown.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        NoticeLog::default()
    }

    /// Takes every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("Notice mutex poisoned"))
    }

    pub fn len(&self) -> usize {
        self.notices.lock().expect("Notice mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for NoticeLog {
    fn add_error(&self, message: String) {
        self.notices.lock().expect("Notice mutex poisoned").push(Notice {
            message,
            raised_at: Utc::now(),
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
