//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                      │
//! │  ├── CoreError        - Cart/domain rule violations                     │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures                            │
//! │                                                                         │
//! │  The App controller itself never surfaces errors: hash routing and      │
//! │  cart-change relaying degrade to no-ops on bad input. Errors here are   │
//! │  for the command layer, which reports them to the user.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and domain rule violations.
///
/// These are caught at the command layer and translated to user-facing
/// messages; they never cross into the controller's routing logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this SKU exists in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The cart has no line item for this SKU.
    #[error("{0} is not in the cart")]
    NotInCart(String),

    /// Cart has exceeded maximum allowed line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when user or catalog input doesn't meet requirements, before
/// any cart mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
