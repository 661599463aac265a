//! RocketCart Core - Shared domain types.
//!
//! This crate provides the common types used across all RocketCart components:
//! - `cart` - The cart store, its collaborators, and persistence
//! - `cli` - Command-line front end for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog products, cart line items, stock levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
