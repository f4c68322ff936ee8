//! # maxqty-host: Host Adapter for the Max Quantity Policy
//!
//! Everything that touches the storefront host lives here: reading the
//! limit from the settings store, snapshotting the cart, naming products in
//! messages, reporting rejections, and registering callbacks against the
//! host's extension points.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Max Quantity Data Flow                           │
//! │                                                                         │
//! │  Host extension point (woocommerce_add_to_cart_validation)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   maxqty-host (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Hooks     │    │    Plugin     │    │ Collaborators│  │   │
//! │  │   │  (hooks.rs)   │───►│  (plugin.rs)  │───►│ ConfigStore  │  │   │
//! │  │   │ priority order│    │ reads limit,  │    │ CartService  │  │   │
//! │  │   │               │    │ calls core    │    │ Catalog      │  │   │
//! │  │   └───────────────┘    └───────────────┘    │ ErrorReporter│  │   │
//! │  │                                             └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  maxqty-core (pure decision)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collaborators`] - Traits for the host services
//! - [`hooks`] - Extension points and the callback registry
//! - [`plugin`] - The callbacks and their registration
//! - [`memory`] - In-process host services
//! - [`error`] - Adapter error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use maxqty_core::{ProductId, MAX_QTY_OPTION_KEY};
//! use maxqty_host::memory::{MemoryCart, MemoryCatalog, MemoryOptions, NoticeLog};
//! use maxqty_host::{Hooks, MaxQuantityPlugin};
//!
//! let options = Arc::new(MemoryOptions::new());
//! options.update_option(MAX_QTY_OPTION_KEY, "3");
//!
//! let notices = Arc::new(NoticeLog::new());
//! let plugin = Arc::new(MaxQuantityPlugin::new(
//!     Arc::clone(&options),
//!     MemoryCart::new("/cart/"),
//!     MemoryCatalog::new(),
//!     Arc::clone(&notices),
//! ));
//!
//! let mut hooks = Hooks::new();
//! plugin.register(&mut hooks);
//!
//! assert!(!hooks.apply_add_to_cart_validation(true, ProductId::new(1), 4));
//! assert_eq!(notices.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collaborators;
pub mod error;
pub mod hooks;
pub mod memory;
pub mod plugin;

// =============================================================================
// Re-exports
// =============================================================================

pub use collaborators::{CartService, CatalogProduct, ConfigStore, ErrorReporter, ProductCatalog};
pub use error::{HostError, HostResult};
pub use hooks::{ExtensionPoint, Hooks};
pub use plugin::{MaxQuantityPlugin, COMMERCE_PLUGIN};
