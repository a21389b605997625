//! # Cart Aggregation
//!
//! The working, mutable set of sale lines for one in-progress
//! transaction, plus the pricing math derived from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Cashier Action             Cart Change                             │
//! │  ──────────────             ───────────                             │
//! │                                                                     │
//! │  Add product ──────────────► merge into matching line, or append    │
//! │                              a new line (insertion order kept)      │
//! │                                                                     │
//! │  Remove line ──────────────► delete exactly the addressed line      │
//! │                                                                     │
//! │  Checkout commits ─────────► clear() wipes every line               │
//! │                                                                     │
//! │  Display total ────────────► grand_total() recomputed on demand,    │
//! │                              never cached                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share the same (product id, customization) key
//! - Every line's quantity is ≥ 1
//! - Unit price is the snapshot taken when the line was created, never
//!   a live re-read of the catalog price
//! - Lines keep insertion order for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::customization::Customization;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::MAX_CART_LINES;

// =============================================================================
// Line Handle
// =============================================================================

/// Opaque, stable handle to a cart line.
///
/// Assigned once at line creation and valid until the line is removed
/// or the cart is cleared. Removal is keyed on this handle rather than
/// on displayed values (name/quantity), so two lines that happen to
/// display identically are still unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(Uuid);

impl LineId {
    fn new() -> Self {
        LineId(Uuid::new_v4())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the current sale.
///
/// ## Price Freezing
/// `unit_price_cents` is captured when the line is created. If the
/// catalog price changes afterwards, this line keeps the original
/// price; totals stay deterministic under concurrent catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable handle, assigned at creation.
    pub id: LineId,

    /// Product ID (UUID) for the catalog lookup at checkout.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Customization signature, or None for an uncustomized item.
    /// Part of the line's identity together with `product_id`.
    pub customization: Option<Customization>,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always ≥ 1.
    pub quantity: i64,

    /// When this line was created.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: &Product, customization: Option<Customization>, quantity: i64) -> Self {
        CartLine {
            id: LineId::new(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            customization,
            unit_price_cents: product.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line subtotal: frozen unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }

    /// Checks whether this line matches a (product id, customization) key.
    #[inline]
    fn matches(&self, product_id: &str, customization: Option<Customization>) -> bool {
        self.product_id == product_id && self.customization == customization
    }

    /// Flattened text form used in cart display and history records:
    /// `"espresso x2 [Medium/Hot/Normal]"`, customization omitted when
    /// absent.
    pub fn describe(&self) -> String {
        match self.customization {
            Some(custom) => format!("{} x{} [{}]", self.name, self.quantity, custom),
            None => format!("{} x{}", self.name, self.quantity),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of lines.
///
/// Owned by exactly one cashier stream; no internal locking. All
/// mutation is synchronous and never suspends.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, merging into an existing line when
    /// the (product id, customization) key already exists.
    ///
    /// `available_stock` is the stock the caller observed when it read
    /// the catalog; the summed line quantity must stay within it.
    ///
    /// ## Returns
    /// The handle of the affected line: the existing one on a merge,
    /// a fresh one on append.
    ///
    /// ## Errors
    /// - `InvalidQuantity` - `quantity` ≤ 0; cart untouched
    /// - `Validation` - merged or new quantity above the per-line
    ///   ceiling ([`crate::MAX_LINE_QUANTITY`]); cart untouched
    /// - `InsufficientStock` - merged or new quantity would exceed
    ///   `available_stock`; cart untouched
    /// - `CartTooLarge` - distinct-line limit reached; cart untouched
    pub fn add(
        &mut self,
        product: &Product,
        customization: Option<Customization>,
        quantity: i64,
        available_stock: i64,
    ) -> CoreResult<LineId> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        // Merge into an existing line with the same identity key.
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&product.id, customization))
        {
            let merged = line.quantity + quantity;
            validate_quantity(merged)?;
            if merged > available_stock {
                return Err(CoreError::InsufficientStock {
                    name: line.name.clone(),
                    available: available_stock,
                    requested: merged,
                });
            }
            line.quantity = merged;
            return Ok(line.id);
        }

        validate_quantity(quantity)?;

        if quantity > available_stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: available_stock,
                requested: quantity,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        let line = CartLine::new(product, customization, quantity);
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Removes exactly one line by its handle.
    ///
    /// Returns the removed line, or `LineNotFound` if the handle is
    /// stale. Two lines that coincidentally display the same values
    /// are never confused: the handle addresses one of them.
    pub fn remove(&mut self, line: LineId) -> CoreResult<CartLine> {
        match self.lines.iter().position(|l| l.id == line) {
            Some(index) => Ok(self.lines.remove(index)),
            None => Err(CoreError::LineNotFound {
                line: line.to_string(),
            }),
        }
    }

    /// Replaces a line's quantity.
    ///
    /// Quantity 0 removes the line; otherwise the new quantity must
    /// pass the per-line ceiling and fit within `available_stock` like
    /// an add.
    pub fn set_quantity(
        &mut self,
        line: LineId,
        quantity: i64,
        available_stock: i64,
    ) -> CoreResult<()> {
        if quantity == 0 {
            self.remove(line)?;
            return Ok(());
        }
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }
        validate_quantity(quantity)?;

        let existing = self
            .lines
            .iter_mut()
            .find(|l| l.id == line)
            .ok_or_else(|| CoreError::LineNotFound {
                line: line.to_string(),
            })?;

        if quantity > available_stock {
            return Err(CoreError::InsufficientStock {
                name: existing.name.clone(),
                available: available_stock,
                requested: quantity,
            });
        }

        existing.quantity = quantity;
        Ok(())
    }

    /// Removes all lines unconditionally.
    ///
    /// Used by the checkout coordinator on commit; the cart is cleared
    /// wholesale, not line by line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    // =========================================================================
    // Pricing Calculator
    // =========================================================================

    /// Grand total in cents: Σ over lines of (frozen unit price × quantity).
    ///
    /// Recomputed on every call from the current lines, never cached,
    /// so repeated calls without intervening mutation are identical.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal().cents()).sum()
    }

    /// Grand total as Money.
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    // =========================================================================
    // Checkout Inputs
    // =========================================================================

    /// Summed requested quantity per distinct product id, in first
    /// appearance order.
    ///
    /// Two lines of the same product with different customizations
    /// contribute to one entry; the checkout decrement is per product,
    /// not per line.
    pub fn demand_by_product(&self) -> Vec<(String, i64)> {
        let mut demand: Vec<(String, i64)> = Vec::new();
        for line in &self.lines {
            match demand.iter_mut().find(|(id, _)| id == &line.product_id) {
                Some((_, qty)) => *qty += line.quantity,
                None => demand.push((line.product_id.clone(), line.quantity)),
            }
        }
        demand
    }

    /// Flattened description of the whole cart for the history ledger:
    /// lines joined by `"; "`, each rendered by [`CartLine::describe`].
    pub fn describe(&self) -> String {
        self.lines
            .iter()
            .map(CartLine::describe)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
