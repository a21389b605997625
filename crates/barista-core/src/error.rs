//! # Error Types
//!
//! Domain-specific error types for barista-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  barista-core errors (this file)                                    │
//! │  ├── CoreError        - Cart/business rule violations               │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  barista-db errors (separate crate)                                 │
//! │  ├── DbError          - Persistence failures                        │
//! │  └── CheckoutError    - Checkout coordinator outcomes               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, quantities, handle)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable at the caller level

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and business rule errors.
///
/// All of these are caller-recoverable: re-prompt for a quantity,
/// reduce the amount, or refresh the cart display.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity was zero or negative.
    #[error("Quantity must be positive, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// Adding would exceed the available stock for that exact line.
    ///
    /// The cart is left unchanged: an existing line keeps its quantity,
    /// and no new line is created.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A cart line handle no longer refers to a live line.
    ///
    /// ## When This Occurs
    /// - The line was removed earlier
    /// - The cart was cleared by a completed checkout
    ///
    /// The caller should refresh its display of the cart.
    #[error("Cart line not found: {line}")]
    LineNotFound { line: String },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation at the catalog boundary, before business
/// logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
