//! # Cart
//!
//! The shopping cart: line items, totals, and the change vocabulary the
//! controller reacts to.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  User Action              Cart Operation          Change Emitted        │
//! │  ───────────              ──────────────          ──────────────        │
//! │                                                                         │
//! │  Pick product ──────────► add_item()       ─────► Add / Change          │
//! │                                                                         │
//! │  Edit quantity ─────────► set_quantity()   ─────► Change / Remove       │
//! │                                                                         │
//! │  Remove line ───────────► remove_item()    ─────► Remove                │
//! │                                                                         │
//! │  Empty cart ────────────► clear()          ─────► Clear                 │
//! │                                                                         │
//! │  Startup ───────────────► (load, app crate)─────► Load                  │
//! │                                                                         │
//! │  NOTE: this crate only *describes* changes; emitting them over a        │
//! │        channel is the app crate's wiring (SharedCart).                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Change Notifications
// =============================================================================

/// What kind of mutation a [`CartChange`] describes.
///
/// The controller's relay rules key off this:
/// - `Load` → nothing further (a save-after-load would be a redundant
///   round-trip to the store)
/// - `Add`/`Change` → user-visible toast
/// - everything except `Load` → header count refresh, then persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Load,
    Add,
    Change,
    Remove,
    Clear,
}

/// Notification payload describing a single cart mutation.
///
/// Consumed transiently by the controller; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    /// The kind of mutation.
    pub action: CartAction,

    /// SKU of the affected line, when the mutation targets one.
    pub sku: Option<String>,

    /// Total item quantity after the mutation.
    pub count: i64,
}

impl CartChange {
    pub fn new(action: CartAction, sku: Option<String>, count: i64) -> Self {
        CartChange { action, sku, count }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the shopping cart.
///
/// Carries a frozen copy of the product data at the time of adding, so
/// the cart displays consistent data even if the catalog entry changes
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen). The price is locked in
    /// when the item enters the cart.
    pub unit_price: Money,

    /// Quantity in cart.
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line from a product and quantity, freezing the
    /// product data as of now.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `sku` (adding the same product increases quantity)
/// - Quantity is always > 0 (setting a quantity to 0 removes the line)
/// - At most [`MAX_CART_ITEMS`] lines, [`MAX_ITEM_QUANTITY`] per line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items in the cart.
    pub items: Vec<CartItem>,

    /// When the cart was created or last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases, returns
    ///   [`CartAction::Change`]
    /// - Product not in cart: new line, returns [`CartAction::Add`]
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<CartAction> {
        crate::validation::validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.sku == product.sku) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(CartAction::Change);
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(CartAction::Add)
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity 0: removes the line, returns [`CartAction::Remove`]
    /// - Otherwise: updates it, returns [`CartAction::Change`]
    /// - Unknown SKU: error
    pub fn set_quantity(&mut self, sku: &str, quantity: i64) -> CoreResult<CartAction> {
        if quantity == 0 {
            return self.remove_item(sku);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        if quantity < 0 {
            return Err(CoreError::Validation(
                crate::error::ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                },
            ));
        }

        match self.items.iter_mut().find(|i| i.sku == sku) {
            Some(item) => {
                item.quantity = quantity;
                Ok(CartAction::Change)
            }
            None => Err(CoreError::NotInCart(sku.to_string())),
        }
    }

    /// Removes a line from the cart by SKU.
    pub fn remove_item(&mut self, sku: &str) -> CoreResult<CartAction> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.sku != sku);

        if self.items.len() == initial_len {
            Err(CoreError::NotInCart(sku.to_string()))
        } else {
            Ok(CartAction::Remove)
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) -> CartAction {
        self.items.clear();
        self.created_at = Utc::now();
        CartAction::Clear
    }

    /// Total item quantity across all lines.
    ///
    /// This is the number the header badge shows: two sodas and a bag of
    /// chips is a count of 3.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Subtotal across all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.count(),
            subtotal: cart.subtotal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(sku: &str, cents: i64) -> Product {
        Product::new(sku, format!("Product {sku}"), Money::from_cents(cents))
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product("BEV-1", 999);

        let action = cart.add_item(&product, 2).unwrap();

        assert_eq!(action, CartAction::Add);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_line() {
        let mut cart = Cart::new();
        let product = test_product("BEV-1", 999);

        assert_eq!(cart.add_item(&product, 2).unwrap(), CartAction::Add);
        assert_eq!(cart.add_item(&product, 3).unwrap(), CartAction::Change);

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_add_rejects_over_limit_quantity() {
        let mut cart = Cart::new();
        let product = test_product("BEV-1", 999);

        cart.add_item(&product, 998).unwrap();
        let err = cart.add_item(&product, 2).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));

        // the failed add left the line untouched
        assert_eq!(cart.count(), 998);
    }

    #[test]
    fn test_add_rejects_full_cart() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&test_product(&format!("SKU-{i}"), 100), 1)
                .unwrap();
        }

        let err = cart.add_item(&test_product("ONE-MORE", 100), 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 1).unwrap();

        assert_eq!(cart.set_quantity("BEV-1", 4).unwrap(), CartAction::Change);
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 1).unwrap();

        assert_eq!(cart.set_quantity("BEV-1", 0).unwrap(), CartAction::Remove);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_sku() {
        let mut cart = Cart::new();
        let err = cart.set_quantity("NOPE", 1).unwrap_err();
        assert!(matches!(err, CoreError::NotInCart(_)));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 1).unwrap();
        cart.add_item(&test_product("SNK-1", 175), 2).unwrap();

        assert_eq!(cart.remove_item("BEV-1").unwrap(), CartAction::Remove);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.remove_item("BEV-1").is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 2).unwrap();
        assert!(!cart.is_empty());

        assert_eq!(cart.clear(), CartAction::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut product = test_product("BEV-1", 250);
        cart.add_item(&product, 1).unwrap();

        // catalog price changes after the fact
        product.price = Money::from_cents(999);

        assert_eq!(cart.items[0].unit_price.cents(), 250);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 2).unwrap();
        cart.add_item(&test_product("SNK-1", 175), 1).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.cents(), 675);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("BEV-1", 250), 2).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();

        assert_eq!(restored.count(), 2);
        assert_eq!(restored.items[0].sku, "BEV-1");
        assert_eq!(restored.items[0].unit_price.cents(), 250);
    }
}
