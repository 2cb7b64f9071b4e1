//! Authentication errors.

use freshcart_commerce::ValidationError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login rejected by the server.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration rejected by the server.
    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// No stored token.
    #[error("not logged in")]
    NotAuthenticated,

    /// Logged in, but the role is too low.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Form input rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credential storage failed.
    #[error("credential storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated
        )
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions)
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(e: std::io::Error) -> Self {
        AuthError::Storage(e.to_string())
    }
}
