//! # Shop View
//!
//! Renders the product catalog. The landing region of the app.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use shopfront_core::Product;

use crate::cart::SharedCart;
use crate::host::Host;
use crate::views::View;

/// Document region this view renders into.
pub const REGION: &str = "shop";

/// The product catalog listing.
pub struct ShopView {
    cart: SharedCart,
    host: Rc<RefCell<dyn Host>>,
    catalog: Vec<Product>,
    visible: bool,
}

impl ShopView {
    pub fn new(cart: SharedCart, host: Rc<RefCell<dyn Host>>, catalog: Vec<Product>) -> Self {
        ShopView {
            cart,
            host,
            catalog,
            visible: false,
        }
    }

    /// The catalog this shop sells.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    fn frame(&self) -> String {
        let mut frame = String::from("SHOP\n");
        self.cart.with_cart(|cart| {
            for product in &self.catalog {
                let in_cart = cart
                    .items
                    .iter()
                    .find(|i| i.sku == product.sku)
                    .map(|i| i.quantity)
                    .unwrap_or(0);

                frame.push_str(&format!(
                    "  {:<8} {:<28} {:>8}",
                    product.sku,
                    product.name,
                    product.price.to_string()
                ));
                if in_cart > 0 {
                    frame.push_str(&format!("   (x{in_cart} in cart)"));
                }
                frame.push('\n');
            }
        });
        frame
    }
}

impl View for ShopView {
    fn install(&mut self) {
        debug!(catalog_size = self.catalog.len(), "shop view installed");
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
