//! Per-session cart container.

use crate::cart::{Cart, CartDrawer, CartLineItem};
use serde::{Deserialize, Serialize};

/// The cart and drawer belonging to one customer session.
///
/// One instance per session, passed to whatever needs it. The cart and the
/// drawer are independent; only [`CartSession::add_to_cart`] touches both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSession {
    cart: Cart,
    #[serde(skip)]
    drawer: CartDrawer,
}

impl CartSession {
    /// Create a session with an empty cart and a closed drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session around an existing cart.
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            drawer: CartDrawer::new(),
        }
    }

    /// Add an item and open the drawer.
    pub fn add_to_cart(&mut self, item: CartLineItem) {
        self.cart.add_item(item);
        self.drawer.open();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn drawer(&self) -> &CartDrawer {
        &self.drawer
    }

    pub fn drawer_mut(&mut self) -> &mut CartDrawer {
        &mut self.drawer
    }

    /// Consume the session, keeping the cart.
    pub fn into_cart(self) -> Cart {
        self.cart
    }
}
