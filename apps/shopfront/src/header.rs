//! # Header Controller
//!
//! Renders the navigation strip: the shop/cart tabs with the active one
//! marked, and the cart badge count. The controller pushes state in
//! through [`HeaderDisplay`]; tests substitute a recording double via
//! `App::set_header`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::app::Selection;
use crate::host::Host;

/// Document region the header renders into.
pub const REGION: &str = "header";

/// What the controller needs from a header.
///
/// The `pay` state maps to the `cart` tab here; payment is presented as
/// a sub-state of cart and has no tab of its own.
pub trait HeaderDisplay {
    /// Marks the active tab.
    fn set_selection(&mut self, selection: Selection);

    /// Updates the cart badge count.
    fn set_count(&mut self, count: i64);
}

/// The default header implementation, rendering through the host.
pub struct HeaderController {
    host: Rc<RefCell<dyn Host>>,
    selection: Selection,
    count: i64,
}

impl HeaderController {
    pub fn new(host: Rc<RefCell<dyn Host>>) -> Self {
        HeaderController {
            host,
            selection: Selection::Shop,
            count: 0,
        }
    }

    fn render(&self) {
        let shop_tab = if self.selection == Selection::Shop {
            "[SHOP]"
        } else {
            " shop "
        };
        let cart_tab = if self.selection == Selection::Cart {
            "[CART]"
        } else {
            " cart "
        };

        let frame = format!("{shop_tab}  {cart_tab}  ({} in cart)\n", self.count);
        self.host.borrow_mut().present(REGION, &frame);
    }
}

impl HeaderDisplay for HeaderController {
    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.render();
    }

    fn set_count(&mut self, count: i64) {
        self.count = count;
        self.render();
    }
}
