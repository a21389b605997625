//! # barista-core: Pure Business Logic for Barista POS
//!
//! This crate is the **heart** of Barista POS. It contains the cart
//! aggregation and pricing logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Barista POS Architecture                       │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                 Terminal front-end (external)               │    │
//! │  │     browse catalog ──► build cart ──► checkout              │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │             ★ barista-core (THIS CRATE) ★                   │    │
//! │  │                                                             │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────────┐ ┌────────────┐   │    │
//! │  │   │  money  │ │  types  │ │     cart     │ │ validation │   │    │
//! │  │   │  Money  │ │ Product │ │ Cart, lines, │ │   rules    │   │    │
//! │  │   │  cents  │ │ SaleRec │ │ grand total  │ │   checks   │   │    │
//! │  │   └─────────┘ └─────────┘ └──────────────┘ └────────────┘   │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                 barista-db (Database Layer)                 │    │
//! │  │     SQLite catalog, history ledger, checkout transaction    │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SaleRecord)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`customization`] - The size/temperature/sweetness identity triple
//! - [`cart`] - Cart aggregation and pricing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use barista_core::cart::Cart;
//! use barista_core::customization::Customization;
//! use barista_core::types::Product;
//! use chrono::Utc;
//!
//! let espresso = Product {
//!     id: "p-1".into(),
//!     name: "espresso".into(),
//!     price_cents: 250,
//!     stock: 50,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&espresso, Some(Customization::default()), 2, espresso.stock).unwrap();
//! assert_eq!(cart.grand_total().to_string(), "5.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod customization;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use barista_core::Cart` instead of
// `use barista_core::cart::Cart`

pub use cart::{Cart, CartLine, LineId};
pub use customization::{Customization, Size, Sweetness, Temperature};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Product, SaleRecord};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps transaction sizes reasonable.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
