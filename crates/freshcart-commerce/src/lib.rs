//! Storefront domain types and logic for FreshCart.
//!
//! Everything here is plain data and pure functions; no I/O.
//!
//! - **Catalog**: Products, variants, categories, bundles, list filters
//! - **Cart**: Cart store, drawer flag, per-session container, delivery fees
//! - **Checkout**: Checkout form, submission state, orders, idempotency keys
//! - **Admin**: Drafts validated locally before they reach the admin API
//!
//! # Example
//!
//! ```rust,ignore
//! use freshcart_commerce::prelude::*;
//!
//! let mut session = CartSession::new();
//! let item = product.line_item(None, 2, Some("no onion".into()))?;
//! session.add_to_cart(item);
//!
//! let totals = compute_totals(session.cart().total_price(), OrderType::Delivery);
//! println!("Total: {}", totals.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod text;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::{CommerceError, ValidationError};
pub use ids::*;
pub use money::{Currency, Money, STORE_CURRENCY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, STORE_CURRENCY};

    // Catalog
    pub use crate::catalog::{
        Bundle, BundleItem, Category, Product, ProductBadge, ProductFilters, ProductVariant,
        SortOption,
    };

    // Cart
    pub use crate::cart::{
        compute_totals, Cart, CartDrawer, CartLineItem, CartSession, FeeSchedule, OrderTotals,
    };

    // Checkout
    pub use crate::checkout::{
        pickup_times, CheckoutFlow, CheckoutForm, CheckoutState, CreateOrderRequest,
        CreatedOrder, IdempotencyKeys, Order, OrderItem, OrderStatus, OrderType,
        PaymentInitiation,
    };

    // Admin
    pub use crate::admin::{AdminStats, BundleDraft, CategoryDraft, ProductDraft};
}
