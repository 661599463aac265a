//! Catalog products and cart line items.
//!
//! `Product` is the catalog record as served by the catalog collaborator;
//! it carries no quantity. `LineItem` is one cart entry: a product plus the
//! quantity the shopper selected. The serde `flatten` on `LineItem` keeps the
//! persisted JSON flat (`{id, name, price, imageUrl, amount}`), matching the
//! wire and storage shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identity; unique within the cart at all times.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// One cart entry: a product plus its selected quantity.
///
/// `amount` is always at least 1; a quantity of zero is expressed by the
/// entry not being in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    /// Selected quantity, >= 1.
    pub amount: u32,
}

impl LineItem {
    /// Create a line item for a freshly added product.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// The product identity of this entry.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// A copy of this entry with a different quantity.
    ///
    /// Mutations always go through this so a candidate cart never aliases
    /// the live one.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            product: self.product.clone(),
            amount,
        }
    }
}
