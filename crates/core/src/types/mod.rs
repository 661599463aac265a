//! Core types for RocketCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod product;
pub mod stock;

pub use id::*;
pub use product::{LineItem, Product};
pub use stock::StockLevel;
