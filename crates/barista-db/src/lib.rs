//! # barista-db: Database Layer for Barista POS
//!
//! This crate provides database access for the Barista POS system.
//! It uses SQLite for local storage with sqlx for async operations,
//! and hosts the checkout coordinator that turns a cart into a stock
//! decrement plus a history record.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Barista POS Data Flow                             │
//! │                                                                         │
//! │  Caller (terminal UI, tests, seed bin)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    barista-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │  ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐   │    │
//! │  │  │   Database   │   │ Repositories  │   │    Checkout      │   │    │
//! │  │  │  (pool.rs)   │   │ (repository/) │   │  (checkout.rs)   │   │    │
//! │  │  │              │   │               │   │                  │   │    │
//! │  │  │ SqlitePool   │◄──│ ProductRepo   │◄──│ Validate stock   │   │    │
//! │  │  │ WAL mode     │   │ HistoryRepo   │   │ One txn commit   │   │    │
//! │  │  │ Migrations   │   │               │   │ Append ledger    │   │    │
//! │  │  └──────────────┘   └───────────────┘   └──────────────────┘   │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                      SQLite Database                            │    │
//! │  │        products (catalog + stock) · history (append-only)       │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog and history repositories
//! - [`checkout`] - The checkout coordinator and receipt types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use barista_db::{CheckoutCoordinator, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/barista.db")).await?;
//!
//! let products = db.products().search("espresso", 20).await?;
//!
//! let coordinator = CheckoutCoordinator::new(db.clone());
//! let receipt = coordinator.checkout(&mut cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutCoordinator, CheckoutError, CheckoutReceipt, HistoryOutcome};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::history::HistoryRepository;
pub use repository::product::ProductRepository;
