//! Commerce error types.

use std::fmt;

use thiserror::Error;

/// A user-correctable input problem, detected before any network call.
///
/// The message is the exact text shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Form field the problem belongs to, when it belongs to a single one.
    pub field: Option<&'static str>,
    /// Message shown to the user.
    pub message: String,
}

impl ValidationError {
    /// Create an error not tied to a specific field.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Create an error for a specific field.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variant not found on the product.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Product is marked unavailable.
    #[error("{0} is sold out")]
    ProductUnavailable(String),

    /// Requested quantity exceeds what is in stock.
    #[error("Only {available} of {product} left in stock")]
    InsufficientStock { product: String, available: i64 },

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// A checkout is already being submitted.
    #[error("Checkout already in progress")]
    CheckoutInProgress,

    /// Unknown order type.
    #[error("Unknown order type: {0}")]
    UnknownOrderType(String),

    /// Local validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_is_message() {
        let err = ValidationError::field("name", "Please fill in all required fields.");
        assert_eq!(err.to_string(), "Please fill in all required fields.");
        assert_eq!(err.field, Some("name"));
    }

    #[test]
    fn test_validation_converts_into_commerce_error() {
        let err: CommerceError = ValidationError::new("bad").into();
        assert!(matches!(err, CommerceError::Validation(_)));
        assert_eq!(err.to_string(), "bad");
    }
}
