//! Stock levels as reported by the inventory collaborator.

use serde::{Deserialize, Serialize};

/// Available quantity for one product, the wire shape of `GET /stock/{id}`.
///
/// Stock is read-only from the cart's point of view; it is consulted before
/// committing a quantity change and never re-validated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Units currently available.
    pub amount: u32,
}

impl StockLevel {
    /// Whether a desired quantity fits within this stock level.
    #[must_use]
    pub const fn covers(&self, desired: u32) -> bool {
        desired <= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_boundary() {
        let stock = StockLevel { amount: 5 };
        assert!(stock.covers(5));
        assert!(!stock.covers(6));
        assert!(stock.covers(0));
    }

    #[test]
    fn test_parses_inventory_response() {
        let stock: StockLevel = serde_json::from_str(r#"{"id": 1, "amount": 3}"#).unwrap();
        assert_eq!(stock.amount, 3);
    }
}
