//! # Views
//!
//! The three view regions of the page. Each one renders a plain-text
//! frame into the host's document surface and owns a `visible` flag that
//! ONLY the controller writes, in response to selection changes.
//!
//! ```text
//! views/
//! ├── mod.rs      ◄─── You are here (View trait, exports)
//! ├── shop.rs     ◄─── Product catalog listing
//! ├── cart.rs     ◄─── Cart lines and totals
//! └── payment.rs  ◄─── Amount due (sub-state of cart)
//! ```
//!
//! Views read the cart when rendering and never write to it.

pub mod cart;
pub mod payment;
pub mod shop;

pub use cart::CartView;
pub use payment::PaymentView;
pub use shop::ShopView;

/// A renderable view region.
pub trait View {
    /// One-time setup after construction; the place a view attaches its
    /// own listeners. The controller delegates here from its own
    /// `install()`.
    fn install(&mut self);

    /// Whether the region is currently shown.
    fn visible(&self) -> bool;

    /// Shows or hides the region. Written only by the controller.
    fn set_visible(&mut self, visible: bool);

    /// Renders the region's frame into the host.
    fn render(&mut self);
}
