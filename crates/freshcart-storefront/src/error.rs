//! Storefront error types.

use freshcart_auth::{AuthError, LOGIN_FAILED, REGISTRATION_FAILED};
use freshcart_commerce::{CommerceError, ValidationError};
use freshcart_data::FetchError;
use thiserror::Error;

/// Shown for any network or server failure.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Shown after a 401, once the stored credentials are gone.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Errors surfaced by storefront operations.
///
/// Validation errors are detected before any request is sent. Remote errors
/// mean the operation was abandoned and may be retried. Unauthorized means
/// the stored credentials have already been cleared.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Form input rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure or non-2xx response.
    #[error("remote call failed: {0}")]
    Remote(#[from] FetchError),

    /// The API rejected the stored token.
    #[error("unauthorized")]
    Unauthorized,

    /// Account-level failure (bad login, failed registration, missing role).
    #[error(transparent)]
    Auth(AuthError),

    /// A checkout is already being submitted.
    #[error("checkout already in progress")]
    Busy,

    /// Nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,
}

impl StorefrontError {
    /// Text to show the customer.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Validation(v) => v.message.clone(),
            StorefrontError::Remote(_) => GENERIC_FAILURE.to_string(),
            StorefrontError::Unauthorized => SESSION_EXPIRED.to_string(),
            StorefrontError::Auth(AuthError::InvalidCredentials) => LOGIN_FAILED.to_string(),
            StorefrontError::Auth(AuthError::RegistrationFailed(_)) => {
                REGISTRATION_FAILED.to_string()
            }
            StorefrontError::Auth(AuthError::NotAuthenticated) => {
                "Please log in to continue.".to_string()
            }
            StorefrontError::Auth(AuthError::InsufficientPermissions) => {
                "You do not have access to this page.".to_string()
            }
            StorefrontError::Auth(_) => GENERIC_FAILURE.to_string(),
            StorefrontError::Busy => "Your order is already being placed.".to_string(),
            StorefrontError::EmptyCart => "Your cart is empty.".to_string(),
        }
    }

    /// Whether the user can fix this by editing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, StorefrontError::Validation(_))
    }
}

impl From<AuthError> for StorefrontError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(v) => StorefrontError::Validation(v),
            other => StorefrontError::Auth(other),
        }
    }
}

impl From<CommerceError> for StorefrontError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::CheckoutInProgress => StorefrontError::Busy,
            CommerceError::Validation(v) => StorefrontError::Validation(v),
            other => StorefrontError::Validation(ValidationError::new(other.to_string())),
        }
    }
}
