//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate is the **heart** of Shopfront. It contains the cart domain
//! as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shopfront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     apps/shopfront                              │   │
//! │  │   App controller ── ShopView ── CartView ── PaymentView         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   demo    │  │   │
//! │  │   │           │  │           │  │ CartItem  │  │  products │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO HOST ACCESS • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopfront-store (Persistence Layer)              │   │
//! │  │            JSON key-value file, in-memory test store            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart, line items, change notifications
//! - [`catalog`] - The built-in demo product catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use shopfront_core::Cart` instead of
// `use shopfront_core::cart::Cart`
pub use cart::{Cart, CartAction, CartChange, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single cart.
///
/// Keeps carts at a size the views can reasonably display and the store
/// can snapshot in one write.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against typo-sized orders (1000 where 10 was meant).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Store key under which the cart snapshot is persisted.
///
/// A single well-known key, same as a browser app using one
/// localStorage slot for its cart.
pub const CART_STORE_KEY: &str = "shopfront.cart";
