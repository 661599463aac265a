//! RocketCart - Client-side cart state manager.
//!
//! Owns the in-memory list of cart line items, mediates all mutations,
//! persists the canonical snapshot after every committed mutation, and
//! queries the external inventory collaborator before committing a
//! quantity change.
//!
//! # Architecture
//!
//! - [`store::CartStore`] holds the cart and applies the reconciliation
//!   rules; every collaborator is injected through a trait seam so tests
//!   can substitute fakes.
//! - [`api::CommerceClient`] reaches the inventory and catalog services
//!   over plain HTTP (`GET /stock/{id}`, `GET /products/{id}`).
//! - [`storage`] persists the cart under the single key
//!   `@RocketShoes:cart`, either in a JSON file or in memory.
//! - [`notify`] carries human-readable failure strings to whatever
//!   displays them; the store never emits success notifications.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::{CartConfig, CartStore, CommerceClient};
//! use rocket_cart::notify::TracingNotifier;
//! use rocket_cart::storage::JsonFileStorage;
//!
//! let config = CartConfig::from_env()?;
//! let client = CommerceClient::new(&config);
//! let storage = JsonFileStorage::new(&config.storage_path);
//! let mut store = CartStore::open(client.clone(), client, storage, TracingNotifier)?;
//!
//! store.add_product(product_id).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use api::CommerceClient;
pub use config::{CartConfig, ConfigError};
pub use error::{ServiceError, StorageError};
pub use notify::Notifier;
pub use storage::CartStorage;
pub use store::{CartStore, CatalogService, InventoryService, Outcome, Rejection};
