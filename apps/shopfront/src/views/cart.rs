//! # Cart View
//!
//! Renders the cart lines and totals, e.g.:
//!
//! ```text
//! CART (3 items)
//!   BEV-1    Sparkling Water 500ml        x2    $2.58
//!   SNK-1    Sea Salt Chips               x1    $2.49
//!   ─────────────────────────────────────────────────
//!   Subtotal                                   $5.07
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::cart::SharedCart;
use crate::host::Host;
use crate::views::View;

/// Document region this view renders into.
pub const REGION: &str = "cart";

/// The cart contents listing.
pub struct CartView {
    cart: SharedCart,
    host: Rc<RefCell<dyn Host>>,
    visible: bool,
}

impl CartView {
    pub fn new(cart: SharedCart, host: Rc<RefCell<dyn Host>>) -> Self {
        CartView {
            cart,
            host,
            visible: false,
        }
    }

    fn frame(&self) -> String {
        self.cart.with_cart(|cart| {
            if cart.is_empty() {
                return "CART\n  (empty)\n".to_string();
            }

            let mut frame = format!("CART ({} items)\n", cart.count());
            for item in &cart.items {
                frame.push_str(&format!(
                    "  {:<8} {:<28} x{:<3} {:>8}\n",
                    item.sku,
                    item.name,
                    item.quantity,
                    item.line_total().to_string()
                ));
            }
            frame.push_str(&format!(
                "  Subtotal {:>42}\n",
                cart.subtotal().to_string()
            ));
            frame
        })
    }
}

impl View for CartView {
    fn install(&mut self) {
        debug!("cart view installed");
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.host.borrow_mut().present(REGION, &frame);
    }
}
