//! Storefront client for FreshCart.
//!
//! - [`StorefrontApi`] / [`AdminApi`]: the remote API as async traits
//! - [`HttpStorefront`]: their HTTP implementation, with bearer auth and
//!   logout on 401
//! - [`CheckoutService`]: validates, places the order, starts payment and
//!   clears the cart

mod api;
mod checkout;
mod config;
mod error;
mod http;

pub use api::{AdminApi, Page, StorefrontApi};
pub use checkout::{CheckoutOutcome, CheckoutService};
pub use config::{StorefrontConfig, API_URL_ENV, DEFAULT_API_URL};
pub use error::{StorefrontError, GENERIC_FAILURE, SESSION_EXPIRED};
pub use http::HttpStorefront;
