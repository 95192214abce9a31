//! # Shared Cart
//!
//! Wires the pure [`Cart`] domain to the store and the change-notification
//! channel. This is the collaborator every view and the controller hold.
//!
//! ## Thread Model
//! The whole app is single-threaded and event-driven, so the cart lives
//! behind `Rc<RefCell<..>>`; no handler suspends while holding a borrow.
//!
//! ## Change Notifications
//! Every mutation emits exactly one [`CartChange`] AFTER the mutation
//! lands, so a listener that reads the cart in response always observes
//! post-mutation state. `save()` emits nothing - persisting is not a
//! mutation, and a save-triggered notification would loop.
//!
//! ## Degradation
//! `load()` and `save()` never fail from the caller's point of view: a
//! broken store or corrupt snapshot is logged at `warn` and the cart
//! carries on from empty (load) or unsaved (save) state.

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use shopfront_core::{
    Cart, CartAction, CartChange, CartTotals, CoreResult, Product, CART_STORE_KEY,
};
use shopfront_store::KeyValueStore;

/// Shared handle to the cart, its store, and its change notifier.
///
/// Cloning shares the same underlying cart.
#[derive(Clone)]
pub struct SharedCart {
    inner: Rc<RefCell<Cart>>,
    store: Rc<dyn KeyValueStore>,
    changes: Sender<CartChange>,
}

impl SharedCart {
    /// Creates an empty cart bound to `store`, notifying `changes` on
    /// every mutation.
    pub fn new(store: Rc<dyn KeyValueStore>, changes: Sender<CartChange>) -> Self {
        SharedCart {
            inner: Rc::new(RefCell::new(Cart::new())),
            store,
            changes,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads the persisted snapshot, replacing the in-memory cart.
    ///
    /// Absent or unreadable snapshots leave an empty cart. Emits a
    /// single `Load` change either way.
    pub fn load(&self) {
        match self.store.read(CART_STORE_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<Cart>(value) {
                Ok(cart) => {
                    debug!(count = cart.count(), "cart loaded from store");
                    *self.inner.borrow_mut() = cart;
                }
                Err(err) => {
                    warn!(error = %err, "persisted cart is unreadable, starting empty");
                    *self.inner.borrow_mut() = Cart::new();
                }
            },
            Ok(None) => {
                debug!("no persisted cart, starting empty");
            }
            Err(err) => {
                warn!(error = %err, "cart load failed, starting empty");
            }
        }

        self.emit(CartAction::Load, None);
    }

    /// Persists the current cart snapshot. Emits nothing.
    pub fn save(&self) {
        let snapshot = match serde_json::to_value(&*self.inner.borrow()) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "cart snapshot serialization failed");
                return;
            }
        };

        if let Err(err) = self.store.write(CART_STORE_KEY, &snapshot) {
            warn!(error = %err, "cart save failed");
        }
    }

    // =========================================================================
    // Mutations (each emits exactly one change)
    // =========================================================================

    /// Adds a product, merging with an existing line.
    pub fn add(&self, product: &Product, quantity: i64) -> CoreResult<()> {
        let action = self.inner.borrow_mut().add_item(product, quantity)?;
        self.emit(action, Some(product.sku.clone()));
        Ok(())
    }

    /// Sets a line's quantity (0 removes the line).
    pub fn set_quantity(&self, sku: &str, quantity: i64) -> CoreResult<()> {
        let action = self.inner.borrow_mut().set_quantity(sku, quantity)?;
        self.emit(action, Some(sku.to_string()));
        Ok(())
    }

    /// Removes a line by SKU.
    pub fn remove(&self, sku: &str) -> CoreResult<()> {
        let action = self.inner.borrow_mut().remove_item(sku)?;
        self.emit(action, Some(sku.to_string()));
        Ok(())
    }

    /// Empties the cart.
    pub fn clear(&self) {
        let action = self.inner.borrow_mut().clear();
        self.emit(action, None);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Total item quantity (the header badge number).
    pub fn count(&self) -> i64 {
        self.inner.borrow().count()
    }

    /// Display totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.inner.borrow())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Runs `f` with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.inner.borrow())
    }

    fn emit(&self, action: CartAction, sku: Option<String>) {
        let change = CartChange::new(action, sku, self.count());
        if self.changes.send(change).is_err() {
            debug!("cart-change listener went away");
        }
    }
}
