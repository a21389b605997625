//! # Repository Layer
//!
//! Repository implementations for database access.
//!
//! ## Pattern
//! Each repository owns a clone of the connection pool and exposes
//! typed methods over one table:
//!
//! - [`product::ProductRepository`] - the catalog collaborator:
//!   lookups, search, inserts, stock movements
//! - [`history::HistoryRepository`] - the append-only checkout ledger
//!
//! The checkout coordinator composes both; stock decrements that must
//! share its transaction are connection-scoped functions rather than
//! pool methods.

pub mod history;
pub mod product;
