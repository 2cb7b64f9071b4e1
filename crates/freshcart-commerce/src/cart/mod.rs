//! Shopping cart module.
//!
//! Contains the cart store, the drawer flag, the per-session container and
//! the delivery fee rules.

mod cart;
mod drawer;
mod pricing;
mod session;

pub use cart::{Cart, CartLineItem, LineKey};
pub use drawer::CartDrawer;
pub use pricing::{compute_totals, FeeSchedule, OrderTotals, DELIVERY_FEE, FREE_DELIVERY_THRESHOLD};
pub use session::CartSession;
