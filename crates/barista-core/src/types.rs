//! # Domain Types
//!
//! Core domain types used throughout Barista POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐        ┌─────────────────┐                     │
//! │  │    Product      │        │   SaleRecord    │                     │
//! │  │  ─────────────  │        │  ─────────────  │                     │
//! │  │  id (UUID)      │        │  id (UUID)      │                     │
//! │  │  name           │        │  date           │                     │
//! │  │  price_cents    │        │  items (text)   │                     │
//! │  │  stock          │        │  total_cents    │                     │
//! │  └─────────────────┘        └─────────────────┘                     │
//! │                                                                     │
//! │  Product is the catalog's read-only snapshot as seen by the cart;   │
//! │  SaleRecord is the append-only history ledger entity.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// The cart consumes this as a read-only snapshot: `price_cents` is
/// copied onto a cart line at add time, and `stock` is only the value
/// observed when the snapshot was read. Checkout re-reads stock; it
/// never trusts this field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and in history records.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative as observed by the core.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (stock movements included).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units are covered by the observed stock.
    #[inline]
    pub fn covers(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One completed checkout in the history ledger.
///
/// Append-only: records are created exactly once per successful
/// checkout and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the checkout committed.
    pub date: DateTime<Utc>,

    /// Flattened description of every line, e.g.
    /// `"espresso x2 [Medium/Hot/Normal]; mocha x1"`.
    pub items: String,

    /// Grand total in cents at the moment of commit.
    pub total_cents: i64,
}

impl SaleRecord {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn espresso() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "espresso".to_string(),
            price_cents: 250,
            stock: 50,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_price() {
        assert_eq!(espresso().price(), Money::from_cents(250));
    }

    #[test]
    fn test_product_covers() {
        let product = espresso();
        assert!(product.covers(50));
        assert!(!product.covers(51));
    }

    #[test]
    fn test_sale_record_total() {
        let record = SaleRecord {
            id: "s-1".to_string(),
            date: Utc::now(),
            items: "espresso x2".to_string(),
            total_cents: 500,
        };
        assert_eq!(record.total().to_string(), "5.00");
    }
}
