//! # Checkout Coordinator
//!
//! Converts a cart into a stock decrement plus one audit record, then
//! empties the cart.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Phases                                │
//! │                                                                     │
//! │   Idle ──► Validating ──► Committing ──► Done                       │
//! │              │                                                      │
//! │              └──► Aborted (empty cart: no reads, no writes)         │
//! │                                                                     │
//! │  Validating:  re-read current stock per distinct product id.        │
//! │               Missing product → abort before any write.             │
//! │               Over-demand → proceed (lenient policy, see below).    │
//! │                                                                     │
//! │  Committing:  ONE transaction over every per-product clamped        │
//! │               decrement; any failure rolls everything back.         │
//! │               Then append one SaleRecord to the ledger.             │
//! │                                                                     │
//! │  Done:        clear the cart, return the receipt.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Stock Policy
//! The coordinator does NOT abort when summed demand exceeds current
//! stock: the decrement clamps at zero (`MAX(stock - qty, 0)`), so
//! checkout never blocks on a stock race while stock never goes
//! negative. This is a documented product decision, not an oversight;
//! the stricter alternative (abort on aggregate shortfall) would change
//! observable behavior.
//!
//! ## Partial Commit
//! The stock transaction and the history append are separate writes.
//! If the append fails after stock has committed, the sale has already
//! happened physically: stock is NOT rolled back and the cart is NOT
//! re-opened. The receipt carries [`HistoryOutcome::Failed`] so the
//! caller can surface a non-fatal warning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::history::generate_record_id;
use crate::repository::product;
use barista_core::{Cart, SaleRecord};

// =============================================================================
// Results
// =============================================================================

/// Errors that abort a checkout before any write.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout attempted with no lines. No state change, no writes;
    /// the caller should re-enable item selection.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A collaborator call failed before the stock commit. Cart,
    /// catalog stock, and history are all unchanged.
    #[error(transparent)]
    Persistence(#[from] DbError),
}

/// Whether the audit record made it into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryOutcome {
    /// The sale record was appended.
    Recorded,
    /// Stock committed but the append failed: the partial-commit case.
    /// Non-fatal; the stock change is the higher-value write.
    Failed { reason: String },
}

impl HistoryOutcome {
    /// True when the audit record was written.
    pub fn is_recorded(&self) -> bool {
        matches!(self, HistoryOutcome::Recorded)
    }
}

/// What the cashier sees after a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    /// ID of the sale record (present even if the append failed).
    pub record_id: String,

    /// When the stock commit happened.
    pub completed_at: DateTime<Utc>,

    /// Flattened description of every line at the moment of commit.
    pub items: String,

    /// Committed grand total in cents.
    pub total_cents: i64,

    /// Number of distinct lines the sale had.
    pub line_count: usize,

    /// Audit trail status; `Failed` is a warning, not an error.
    pub history: HistoryOutcome,
}

// =============================================================================
// Coordinator
// =============================================================================

/// Coordinates the atomic effect of a checkout: stock decrements across
/// every product in the cart, one history append, then a cart clear.
///
/// Collaborators (catalog and ledger) are injected via the [`Database`]
/// handle rather than reached through globals.
#[derive(Debug, Clone)]
pub struct CheckoutCoordinator {
    db: Database,
}

impl CheckoutCoordinator {
    /// Creates a coordinator over the given database handle.
    pub fn new(db: Database) -> Self {
        CheckoutCoordinator { db }
    }

    /// Runs the checkout for `cart`.
    ///
    /// On success the cart is cleared and the receipt carries the
    /// committed total and line count. On any error the cart, catalog
    /// stock, and history are exactly as they were.
    pub async fn checkout(&self, cart: &mut Cart) -> Result<CheckoutReceipt, CheckoutError> {
        if cart.is_empty() {
            debug!(phase = "aborted", "Checkout rejected: empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let demand = cart.demand_by_product();
        debug!(
            phase = "validating",
            lines = cart.line_count(),
            products = demand.len(),
            total_cents = cart.subtotal_cents(),
            "Validating stock for checkout"
        );

        self.validate(&demand).await?;

        debug!(phase = "committing", products = demand.len(), "Applying stock decrements");
        self.commit_stock(&demand).await?;

        // Stock is committed. From here on, nothing rolls back and the
        // cart will be cleared; failures degrade to a receipt warning.
        let record = SaleRecord {
            id: generate_record_id(),
            date: Utc::now(),
            items: cart.describe(),
            total_cents: cart.subtotal_cents(),
        };

        let history = match self.db.history().append(&record).await {
            Ok(()) => HistoryOutcome::Recorded,
            Err(err) => {
                error!(
                    record_id = %record.id,
                    error = %err,
                    "Stock committed but history append failed; sale is not rolled back"
                );
                HistoryOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        let receipt = CheckoutReceipt {
            record_id: record.id,
            completed_at: record.date,
            items: record.items,
            total_cents: record.total_cents,
            line_count: cart.line_count(),
            history,
        };

        cart.clear();

        info!(
            phase = "done",
            record_id = %receipt.record_id,
            total_cents = receipt.total_cents,
            lines = receipt.line_count,
            history_recorded = receipt.history.is_recorded(),
            "Checkout complete"
        );

        Ok(receipt)
    }

    /// Re-reads current stock for every distinct product in the cart.
    ///
    /// The add-time stock values are deliberately NOT reused: time has
    /// passed and another sale may have moved stock. A shortfall only
    /// produces a warning (the clamp absorbs it); a missing product row
    /// aborts while nothing has been written yet.
    async fn validate(&self, demand: &[(String, i64)]) -> DbResult<()> {
        let products = self.db.products();

        for (product_id, quantity) in demand {
            let current = products
                .get_by_id(product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", product_id))?;

            if !current.covers(*quantity) {
                warn!(
                    product = %current.name,
                    available = current.stock,
                    requested = quantity,
                    "Demand exceeds current stock; decrement will clamp at zero"
                );
            }
        }

        Ok(())
    }

    /// Applies every per-product clamped decrement in one transaction.
    ///
    /// All rows move together or not at all, so two concurrent
    /// checkouts against the same products are strictly ordered by the
    /// database and a failed checkout leaves stock untouched.
    async fn commit_stock(&self, demand: &[(String, i64)]) -> DbResult<()> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (product_id, quantity) in demand {
            product::decrement_stock_clamped(&mut *tx, product_id, *quantity).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;
    use barista_core::{Customization, Product, Size, Sweetness, Temperature};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            stock,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    fn iced_large() -> Option<Customization> {
        Some(Customization::new(
            Size::Large,
            Temperature::Cold,
            Sweetness::Less,
        ))
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_without_writes() {
        let db = test_db().await;
        let espresso = seed_product(&db, "espresso", 250, 50).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        let mut cart = Cart::new();
        let err = coordinator.checkout(&mut cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));

        // No stock change, no history record.
        let after = db.products().get_by_id(&espresso.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 50);
        assert_eq!(db.history().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_checkout_decrements_stock_and_appends_history() {
        let db = test_db().await;
        let espresso = seed_product(&db, "espresso", 250, 50).await;
        let mocha = seed_product(&db, "mocha", 375, 25).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        let mut cart = Cart::new();
        cart.add(&espresso, Some(Customization::default()), 2, 50)
            .unwrap();
        cart.add(&mocha, None, 1, 25).unwrap();

        let receipt = coordinator.checkout(&mut cart).await.unwrap();

        assert_eq!(receipt.total_cents, 875);
        assert_eq!(receipt.line_count, 2);
        assert!(receipt.history.is_recorded());

        // Cart cleared atomically, total back to 0.00.
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().to_string(), "0.00");

        // Stock decreased by the summed quantities.
        let espresso_after = db.products().get_by_id(&espresso.id).await.unwrap().unwrap();
        let mocha_after = db.products().get_by_id(&mocha.id).await.unwrap().unwrap();
        assert_eq!(espresso_after.stock, 48);
        assert_eq!(mocha_after.stock, 24);

        // Exactly one ledger record with the flattened description.
        let records = db.history().list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].items,
            "espresso x2 [Medium/Hot/Normal]; mocha x1"
        );
        assert_eq!(records[0].total_cents, 875);
    }

    #[tokio::test]
    async fn test_demand_summed_across_customizations_of_one_product() {
        let db = test_db().await;
        let espresso = seed_product(&db, "espresso", 250, 50).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        let mut cart = Cart::new();
        cart.add(&espresso, Some(Customization::default()), 2, 50)
            .unwrap();
        cart.add(&espresso, iced_large(), 3, 50).unwrap();

        coordinator.checkout(&mut cart).await.unwrap();

        // One product row, one decrement of 5.
        let after = db.products().get_by_id(&espresso.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 45);
    }

    #[tokio::test]
    async fn test_over_demand_clamps_stock_at_zero() {
        let db = test_db().await;
        let cortado = seed_product(&db, "cortado", 450, 5).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        // The cart was built when stock read 8; it has since dropped to
        // 5. The lenient policy lets checkout proceed and clamp.
        let mut cart = Cart::new();
        cart.add(&cortado, None, 8, 8).unwrap();

        let receipt = coordinator.checkout(&mut cart).await.unwrap();
        assert_eq!(receipt.total_cents, 8 * 450);

        let after = db.products().get_by_id(&cortado.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
    }

    #[tokio::test]
    async fn test_missing_product_aborts_before_any_write() {
        let db = test_db().await;
        let espresso = seed_product(&db, "espresso", 250, 50).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        // A line whose product has vanished from the catalog.
        let now = Utc::now();
        let ghost = Product {
            id: "ghost".to_string(),
            name: "discontinued".to_string(),
            price_cents: 100,
            stock: 1,
            created_at: now,
            updated_at: now,
        };

        let mut cart = Cart::new();
        cart.add(&espresso, None, 2, 50).unwrap();
        cart.add(&ghost, None, 1, 1).unwrap();

        let err = coordinator.checkout(&mut cart).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Persistence(DbError::NotFound { .. })
        ));

        // Atomicity: cart intact, stock untouched, no history.
        assert_eq!(cart.line_count(), 2);
        let after = db.products().get_by_id(&espresso.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 50);
        assert_eq!(db.history().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_failure_is_partial_commit_not_rollback() {
        let db = test_db().await;
        let mocha = seed_product(&db, "mocha", 375, 25).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        // Break the ledger after the catalog is in place.
        sqlx::query("DROP TABLE history")
            .execute(db.pool())
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.add(&mocha, None, 2, 25).unwrap();

        let receipt = coordinator.checkout(&mut cart).await.unwrap();

        // Stock committed and the cart cleared; only the audit line is
        // flagged as failed.
        assert!(matches!(receipt.history, HistoryOutcome::Failed { .. }));
        assert!(cart.is_empty());
        let after = db.products().get_by_id(&mocha.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 23);
    }

    #[tokio::test]
    async fn test_sequential_checkouts_never_go_negative() {
        let db = test_db().await;
        let flat_white = seed_product(&db, "flat white", 350, 8).await;
        let coordinator = CheckoutCoordinator::new(db.clone());

        for _ in 0..3 {
            let mut cart = Cart::new();
            // Built against a stale stock read of 8 each time.
            cart.add(&flat_white, None, 4, 8).unwrap();
            coordinator.checkout(&mut cart).await.unwrap();
        }

        // 8 - 4 - 4 - 4 clamps: max(8 - 12, 0) = 0.
        let after = db.products().get_by_id(&flat_white.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
        assert_eq!(db.history().count().await.unwrap(), 3);
    }
}
