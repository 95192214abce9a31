//! # App Controller
//!
//! The orchestration layer of the single-page shop: owns the selection
//! state machine, routes hash changes into it, and relays cart changes
//! to the header, the toast surface, and the store.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         App Orchestration                               │
//! │                                                                         │
//! │  host hash change ──► handle_hash_change ──► set_selection              │
//! │                                                   │                     │
//! │                          ┌────────────────────────┤                     │
//! │                          ▼                        ▼                     │
//! │                  header.selection          view visibility flags        │
//! │                                                                         │
//! │  cart mutation ──► cart_changed ──► toast (add/change only)             │
//! │                                     header count refresh                │
//! │                                     cart save                           │
//! │                                     (strictly in that order)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Selection State Machine
//! ```text
//! selection   header      shop.visible   cart.visible   payment.visible
//! ─────────   ──────      ────────────   ────────────   ───────────────
//! "shop"      shop        true           false          false
//! "cart"      cart        false          true           false
//! "pay"       cart        (unchanged)    true           true
//! other       (no transition: everything keeps its prior value)
//! ```
//!
//! The controller is deliberately permissive: malformed events, unknown
//! selections, and a missing notification surface all degrade to doing
//! nothing. Nothing in here returns an error.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crossbeam_channel::{unbounded, Receiver};
use thiserror::Error;
use tracing::{debug, info, warn};

use shopfront_core::catalog::demo_catalog;
use shopfront_core::{CartAction, CartChange};
use shopfront_store::KeyValueStore;

use crate::cart::SharedCart;
use crate::header::{HeaderController, HeaderDisplay};
use crate::host::{HashChangeEvent, Host};
use crate::views::{CartView, PaymentView, ShopView, View};

// =============================================================================
// Selection
// =============================================================================

/// The currently displayed top-level view region.
///
/// Hash fragments parse into this; anything else fails to parse and the
/// state machine treats it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Shop,
    Cart,
    Pay,
}

/// A hash fragment that names no view region.
#[derive(Debug, Error)]
#[error("unrecognized selection: {0}")]
pub struct UnknownSelection(String);

impl FromStr for Selection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shop" => Ok(Selection::Shop),
            "cart" => Ok(Selection::Cart),
            "pay" => Ok(Selection::Pay),
            other => Err(UnknownSelection(other.to_string())),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Selection::Shop => "shop",
            Selection::Cart => "cart",
            Selection::Pay => "pay",
        })
    }
}

// =============================================================================
// App
// =============================================================================

/// Toast shown whenever an item is added or a quantity changes.
const CART_UPDATED_TOAST: &str = "Cart updated";

/// The single-page shop controller.
///
/// Constructed once per page lifecycle; `install()` wires the host
/// subscription, `run()` performs first-time setup, `uninstall()`
/// releases the subscription again.
pub struct App {
    host: Rc<RefCell<dyn Host>>,
    storage: Rc<dyn KeyValueStore>,
    cart: SharedCart,
    cart_changes: Receiver<CartChange>,
    shop_view: ShopView,
    cart_view: CartView,
    payment_view: PaymentView,
    header: Box<dyn HeaderDisplay>,
    hash_changes: Option<Receiver<HashChangeEvent>>,
    started: bool,
}

impl App {
    /// Builds the cart, the three views, and the header, all bound to
    /// the same cart instance and host. No I/O happens here; the store
    /// isn't touched until `run()` loads the cart.
    pub fn new(host: Rc<RefCell<dyn Host>>, storage: Rc<dyn KeyValueStore>) -> Self {
        let (changes_tx, changes_rx) = unbounded();
        let cart = SharedCart::new(Rc::clone(&storage), changes_tx);

        let shop_view = ShopView::new(cart.clone(), Rc::clone(&host), demo_catalog());
        let cart_view = CartView::new(cart.clone(), Rc::clone(&host));
        let payment_view = PaymentView::new(cart.clone(), Rc::clone(&host));
        let header = Box::new(HeaderController::new(Rc::clone(&host)));

        App {
            host,
            storage,
            cart,
            cart_changes: changes_rx,
            shop_view,
            cart_view,
            payment_view,
            header,
            hash_changes: None,
            started: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Acquires the hash-change subscription and lets each view attach
    /// its own listeners.
    pub fn install(&mut self) {
        if self.hash_changes.is_none() {
            self.hash_changes = Some(self.host.borrow_mut().subscribe_hash_changes());
        }
        self.shop_view.install();
        self.cart_view.install();
        self.payment_view.install();
    }

    /// Releases the hash-change subscription. Calling this without a
    /// prior `install()` is a no-op, as removing a listener that was
    /// never added is in the browser model.
    pub fn uninstall(&mut self) {
        if self.hash_changes.take().is_some() {
            self.host.borrow_mut().unsubscribe_hash_changes();
        }
    }

    /// First-time setup: establish `#shop` as the canonical entry point,
    /// load the cart, render the landing views, sync the header count,
    /// and select the shop.
    ///
    /// Runs once per page lifecycle; a second call warns and does
    /// nothing.
    pub fn run(&mut self) {
        if self.started {
            warn!("run() called more than once, ignoring");
            return;
        }
        self.started = true;

        info!("starting shopfront session");
        self.host.borrow_mut().replace_hash("shop");
        self.cart.load();
        self.shop_view.render();
        self.cart_view.render();
        self.update_cart_count_display();
        self.set_selection("shop");
    }

    // =========================================================================
    // Selection State Machine
    // =========================================================================

    /// Applies a selection, toggling view visibility and the header tab.
    ///
    /// Unrecognized values produce no transition; every flag keeps its
    /// prior value.
    pub fn set_selection(&mut self, sel: &str) {
        match sel.parse::<Selection>() {
            Ok(selection @ (Selection::Shop | Selection::Cart)) => {
                self.header.set_selection(selection);
                self.shop_view.set_visible(selection == Selection::Shop);
                self.cart_view.set_visible(selection != Selection::Shop);
                self.payment_view.set_visible(false);
            }
            Ok(Selection::Pay) => {
                // payment presents as a sub-state of cart: the cart tab
                // stays active and the cart stays on screen underneath.
                // shop visibility is left as-is; pay is only reached from
                // cart, where the shop is already hidden.
                self.header.set_selection(Selection::Cart);
                self.cart_view.set_visible(true);
                self.payment_view.set_visible(true);
            }
            Err(_) => {
                debug!(selection = sel, "ignoring unrecognized selection");
            }
        }
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Drains pending host and cart events, in arrival order within each
    /// queue. Called from the host event loop after each interaction.
    pub fn process_events(&mut self) {
        let hash_events: Vec<HashChangeEvent> = match &self.hash_changes {
            Some(receiver) => receiver.try_iter().collect(),
            None => Vec::new(),
        };
        for event in &hash_events {
            self.handle_hash_change(event);
        }

        let changes: Vec<CartChange> = self.cart_changes.try_iter().collect();
        for change in &changes {
            self.cart_changed(change);
        }
    }

    /// Derives the intended selection from the text after the LAST `#`
    /// of the new location. Events without a URL or without a fragment
    /// are ignored; the fragment itself is forwarded verbatim (unknown
    /// values become no-ops in the state machine).
    pub fn handle_hash_change(&mut self, event: &HashChangeEvent) {
        let Some(url) = event.new_url.as_deref() else {
            return;
        };
        let Some(index) = url.rfind('#') else {
            return;
        };
        self.set_selection(&url[index + 1..]);
    }

    /// Reacts to a cart mutation notification.
    ///
    /// - `load`: nothing further (a save right after a load would be a
    ///   redundant round-trip to the store)
    /// - `add`/`change`: user-visible toast
    /// - all non-`load` actions: header count refresh, then save
    ///
    /// Side effects run strictly in that order, and the save sees the
    /// cart as it stands after the triggering mutation.
    pub fn cart_changed(&mut self, change: &CartChange) {
        if change.action == CartAction::Load {
            return;
        }
        if matches!(change.action, CartAction::Add | CartAction::Change) {
            self.show_toast(CART_UPDATED_TOAST);
        }
        self.update_cart_count_display();
        self.cart.save();
    }

    /// Pops up a user notification, best-effort. Hosts without a
    /// notification surface drop the message silently.
    pub fn show_toast(&mut self, message: &str) {
        let mut host = self.host.borrow_mut();
        match host.notifications() {
            Some(snackbar) => snackbar.show(message),
            None => debug!(message, "no notification surface, dropping toast"),
        }
    }

    /// Copies the cart's current item count into the header badge.
    fn update_cart_count_display(&mut self) {
        self.header.set_count(self.cart.count());
    }

    /// Re-renders every currently visible view.
    pub fn render_visible(&mut self) {
        if self.shop_view.visible() {
            self.shop_view.render();
        }
        if self.cart_view.visible() {
            self.cart_view.render();
        }
        if self.payment_view.visible() {
            self.payment_view.render();
        }
    }

    // =========================================================================
    // Testing Hooks
    // =========================================================================

    /// Substitutes the header (tests install a recording double).
    pub fn set_header(&mut self, header: Box<dyn HeaderDisplay>) {
        self.header = header;
    }

    pub fn cart(&self) -> &SharedCart {
        &self.cart
    }

    pub fn storage(&self) -> &Rc<dyn KeyValueStore> {
        &self.storage
    }

    pub fn shop_view(&self) -> &ShopView {
        &self.shop_view
    }

    pub fn cart_view(&self) -> &CartView {
        &self.cart_view
    }

    pub fn payment_view(&self) -> &PaymentView {
        &self.payment_view
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimHost;
    use crate::{header, views};
    use shopfront_core::{CartChange, Money, Product, CART_STORE_KEY};
    use shopfront_store::MemoryStore;

    fn fixture() -> (App, Rc<RefCell<SimHost>>, Rc<MemoryStore>) {
        let sim = Rc::new(RefCell::new(SimHost::new()));
        let store = Rc::new(MemoryStore::new());
        let host: Rc<RefCell<dyn Host>> = sim.clone();
        let storage: Rc<dyn KeyValueStore> = store.clone();
        (App::new(host, storage), sim, store)
    }

    fn product(sku: &str, cents: i64) -> Product {
        Product::new(sku, format!("Product {sku}"), Money::from_cents(cents))
    }

    fn visibility(app: &App) -> (bool, bool, bool) {
        (
            app.shop_view().visible(),
            app.cart_view().visible(),
            app.payment_view().visible(),
        )
    }

    // -------------------------------------------------------------------------
    // Selection state machine
    // -------------------------------------------------------------------------

    #[test]
    fn test_selection_shop() {
        let (mut app, sim, _) = fixture();

        app.set_selection("shop");

        assert_eq!(visibility(&app), (true, false, false));
        let frame = sim.borrow().last_frame(header::REGION).unwrap().to_string();
        assert!(frame.contains("[SHOP]"));
    }

    #[test]
    fn test_selection_cart() {
        let (mut app, sim, _) = fixture();

        app.set_selection("cart");

        assert_eq!(visibility(&app), (false, true, false));
        let frame = sim.borrow().last_frame(header::REGION).unwrap().to_string();
        assert!(frame.contains("[CART]"));
    }

    #[test]
    fn test_selection_pay_presents_as_cart_substate() {
        let (mut app, sim, _) = fixture();
        app.set_selection("cart");

        app.set_selection("pay");

        assert_eq!(visibility(&app), (false, true, true));
        let frame = sim.borrow().last_frame(header::REGION).unwrap().to_string();
        assert!(frame.contains("[CART]"));
    }

    #[test]
    fn test_selection_pay_leaves_shop_visibility_alone() {
        // the pay transition never writes the shop flag, so jumping
        // straight from shop to pay keeps the shop on screen
        let (mut app, _, _) = fixture();
        app.set_selection("shop");

        app.set_selection("pay");

        assert_eq!(visibility(&app), (true, true, true));
    }

    #[test]
    fn test_unrecognized_selection_is_a_noop() {
        let (mut app, sim, _) = fixture();
        app.set_selection("cart");
        let frames_before = sim.borrow().frames().len();

        app.set_selection("checkout");
        app.set_selection("");
        app.set_selection("SHOP"); // fragments are case-sensitive

        assert_eq!(visibility(&app), (false, true, false));
        // no header re-render happened either
        assert_eq!(sim.borrow().frames().len(), frames_before);
    }

    // -------------------------------------------------------------------------
    // Hash routing
    // -------------------------------------------------------------------------

    #[test]
    fn test_hash_change_selects_fragment() {
        let (mut app, _, _) = fixture();

        app.handle_hash_change(&HashChangeEvent::new("http://x/#cart", "http://x/#shop"));

        assert_eq!(visibility(&app), (false, true, false));
    }

    #[test]
    fn test_hash_change_uses_last_fragment() {
        let (mut app, _, _) = fixture();

        app.handle_hash_change(&HashChangeEvent::new("http://x/#shop#pay", "http://x/"));

        // text after the LAST '#'
        assert!(app.payment_view().visible());
    }

    #[test]
    fn test_hash_change_without_url_is_ignored() {
        let (mut app, _, _) = fixture();
        app.set_selection("cart");

        let event = HashChangeEvent {
            new_url: None,
            old_url: None,
        };
        app.handle_hash_change(&event);

        assert_eq!(visibility(&app), (false, true, false));
    }

    #[test]
    fn test_hash_change_without_fragment_is_ignored() {
        let (mut app, _, _) = fixture();
        app.set_selection("cart");

        app.handle_hash_change(&HashChangeEvent::new("http://x/plain", "http://x/"));

        assert_eq!(visibility(&app), (false, true, false));
    }

    // -------------------------------------------------------------------------
    // Cart-change relay
    // -------------------------------------------------------------------------

    #[test]
    fn test_cart_changed_load_does_nothing() {
        let (mut app, sim, store) = fixture();

        app.cart_changed(&CartChange::new(CartAction::Load, None, 0));

        assert!(sim.borrow().toasts().is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_cart_changed_add_toasts_and_saves() {
        let (mut app, sim, store) = fixture();

        app.cart_changed(&CartChange::new(CartAction::Add, Some("BEV-1".into()), 1));

        assert_eq!(sim.borrow().toasts(), ["Cart updated"]);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_cart_changed_change_toasts_and_saves() {
        let (mut app, sim, store) = fixture();

        app.cart_changed(&CartChange::new(CartAction::Change, Some("BEV-1".into()), 3));

        assert_eq!(sim.borrow().toasts(), ["Cart updated"]);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_cart_changed_remove_saves_without_toast() {
        let (mut app, sim, store) = fixture();

        app.cart_changed(&CartChange::new(CartAction::Remove, Some("BEV-1".into()), 0));
        app.cart_changed(&CartChange::new(CartAction::Clear, None, 0));

        assert!(sim.borrow().toasts().is_empty());
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_cart_changed_saves_post_mutation_state() {
        let (mut app, _, store) = fixture();
        app.cart().add(&product("BEV-1", 199), 2).unwrap();

        app.process_events();

        let saved = store.read(CART_STORE_KEY).unwrap().unwrap();
        let restored: shopfront_core::Cart = serde_json::from_value(saved).unwrap();
        assert_eq!(restored.count(), 2);
    }

    #[test]
    fn test_cart_changed_side_effect_order() {
        // toast, then header count, then save - observed through one
        // shared journal
        #[derive(Clone, Default)]
        struct Journal(Rc<RefCell<Vec<&'static str>>>);

        struct JournalHeader(Journal);
        impl HeaderDisplay for JournalHeader {
            fn set_selection(&mut self, _selection: Selection) {}
            fn set_count(&mut self, _count: i64) {
                self.0 .0.borrow_mut().push("count");
            }
        }

        struct JournalStore(Journal);
        impl KeyValueStore for JournalStore {
            fn read(&self, _key: &str) -> shopfront_store::StoreResult<Option<serde_json::Value>> {
                Ok(None)
            }
            fn write(
                &self,
                _key: &str,
                _value: &serde_json::Value,
            ) -> shopfront_store::StoreResult<()> {
                self.0 .0.borrow_mut().push("save");
                Ok(())
            }
            fn remove(&self, _key: &str) -> shopfront_store::StoreResult<()> {
                Ok(())
            }
        }

        struct JournalSnackbar(Journal);
        impl crate::host::NotificationHost for JournalSnackbar {
            fn show(&mut self, _message: &str) {
                self.0 .0.borrow_mut().push("toast");
            }
        }

        struct JournalHost(JournalSnackbar);
        impl Host for JournalHost {
            fn location(&self) -> String {
                String::new()
            }
            fn replace_hash(&mut self, _fragment: &str) {}
            fn navigate(&mut self, _fragment: &str) {}
            fn subscribe_hash_changes(&mut self) -> crossbeam_channel::Receiver<HashChangeEvent> {
                crossbeam_channel::unbounded().1
            }
            fn unsubscribe_hash_changes(&mut self) {}
            fn notifications(&mut self) -> Option<&mut dyn crate::host::NotificationHost> {
                Some(&mut self.0)
            }
            fn present(&mut self, _region: &str, _frame: &str) {}
        }

        let journal = Journal::default();
        let host: Rc<RefCell<dyn Host>> = Rc::new(RefCell::new(JournalHost(JournalSnackbar(
            journal.clone(),
        ))));
        let storage: Rc<dyn KeyValueStore> = Rc::new(JournalStore(journal.clone()));

        let mut app = App::new(host, storage);
        app.set_header(Box::new(JournalHeader(journal.clone())));

        app.cart_changed(&CartChange::new(CartAction::Add, Some("BEV-1".into()), 1));

        assert_eq!(*journal.0.borrow(), ["toast", "count", "save"]);
    }

    #[test]
    fn test_toast_without_notification_surface_is_silent() {
        let sim = Rc::new(RefCell::new(SimHost::without_notifications()));
        let host: Rc<RefCell<dyn Host>> = sim.clone();
        let mut app = App::new(host, Rc::new(MemoryStore::new()));

        app.show_toast("Cart updated"); // must not panic, must not record

        assert!(sim.borrow().toasts().is_empty());
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_run_establishes_shop_entry_point() {
        let (mut app, sim, store) = fixture();
        app.install();

        app.run();

        assert!(sim.borrow().location().ends_with("#shop"));
        assert_eq!(store.reads(), 1); // cart loaded exactly once
        assert_eq!(sim.borrow().present_count(views::shop::REGION), 1);
        assert_eq!(sim.borrow().present_count(views::cart::REGION), 1);
        assert_eq!(visibility(&app), (true, false, false));
    }

    #[test]
    fn test_run_twice_is_ignored() {
        let (mut app, sim, store) = fixture();
        app.install();
        app.run();

        app.run();

        assert_eq!(store.reads(), 1);
        assert_eq!(sim.borrow().present_count(views::shop::REGION), 1);
    }

    #[test]
    fn test_run_does_not_emit_hash_event() {
        let (mut app, _, _) = fixture();
        app.install();
        app.run();
        app.set_selection("cart");

        // the replace_hash in run() used replace semantics, so draining
        // events now must not snap the selection back to shop
        app.process_events();

        assert_eq!(visibility(&app), (false, true, false));
    }

    #[test]
    fn test_install_routes_navigation() {
        let (mut app, sim, _) = fixture();
        app.install();
        app.run();

        sim.borrow_mut().navigate("cart");
        app.process_events();

        assert_eq!(visibility(&app), (false, true, false));
    }

    #[test]
    fn test_uninstall_stops_routing() {
        let (mut app, sim, _) = fixture();
        app.install();
        app.run();
        app.uninstall();

        sim.borrow_mut().navigate("cart");
        app.process_events();

        assert_eq!(visibility(&app), (true, false, false));
    }

    #[test]
    fn test_uninstall_without_install_is_noop() {
        let (mut app, _, _) = fixture();
        app.uninstall(); // must not panic
        app.uninstall();
    }

    // -------------------------------------------------------------------------
    // End to end through the queues
    // -------------------------------------------------------------------------

    #[test]
    fn test_mutation_flows_to_toast_header_and_store() {
        let (mut app, sim, store) = fixture();
        app.install();
        app.run();
        app.process_events(); // drain the Load from run()

        app.cart().add(&product("BEV-1", 199), 2).unwrap();
        app.process_events();

        assert_eq!(sim.borrow().toasts(), ["Cart updated"]);
        assert_eq!(store.writes(), 1);
        let frame = sim.borrow().last_frame(header::REGION).unwrap().to_string();
        assert!(frame.contains("(2 in cart)"));
    }

    #[test]
    fn test_load_event_never_saves() {
        let (mut app, sim, store) = fixture();
        app.install();

        app.run(); // queues the Load change
        app.process_events();

        assert!(sim.borrow().toasts().is_empty());
        assert_eq!(store.writes(), 0);
    }

    // -------------------------------------------------------------------------
    // Selection parsing
    // -------------------------------------------------------------------------

    #[test]
    fn test_selection_round_trip() {
        for sel in [Selection::Shop, Selection::Cart, Selection::Pay] {
            assert_eq!(sel.to_string().parse::<Selection>().unwrap(), sel);
        }
        assert!("checkout".parse::<Selection>().is_err());
    }
}
