//! # Payment View
//!
//! Renders the amount due. Presented as a sub-state of the cart (both
//! are visible during `pay`), so this frame stays deliberately small.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::cart::SharedCart;
use crate::host::Host;
use crate::views::View;

/// Document region this view renders into.
pub const REGION: &str = "payment";

/// The checkout panel.
pub struct PaymentView {
    cart: SharedCart,
    host: Rc<RefCell<dyn Host>>,
    visible: bool,
}

impl PaymentView {
    pub fn new(cart: SharedCart, host: Rc<RefCell<dyn Host>>) -> Self {
        PaymentView {
            cart,
            host,
            visible: false,
        }
    }

    fn frame(&self) -> String {
        let totals = self.cart.totals();
        format!(
            "PAYMENT\n  Amount due {:>8}\n  (demo checkout, no charge is made)\n",
            totals.subtotal.to_string()
        )
    }
}

impl View for PaymentView {
    fn install(&mut self) {
        debug!("payment view installed");
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
