//! Login and registration forms.

use crate::error::AuthError;
use freshcart_commerce::ValidationError;
use serde::{Deserialize, Serialize};

/// Shown when a login or register field is empty.
pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";

/// Shown when the server rejects a login.
pub const LOGIN_FAILED: &str = "Invalid email or password.";
/// Shown when the server rejects a registration.
pub const REGISTRATION_FAILED: &str = "Registration failed. Email may already be in use.";

pub const MIN_PASSWORD_LEN: usize = 8;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::new(MISSING_FIELDS).into());
        }
        Ok(())
    }
}

/// Registration input, including the confirmation field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Checks run in order: all fields present, passwords match, length.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm.is_empty()
        {
            return Err(ValidationError::new(MISSING_FIELDS).into());
        }
        if self.password != self.confirm {
            return Err(ValidationError::field("confirm", PASSWORD_MISMATCH).into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::field("password", PASSWORD_TOO_SHORT).into());
        }
        Ok(())
    }

    /// Validate and build the request body.
    pub fn into_request(self) -> Result<RegisterRequest, AuthError> {
        self.validate()?;
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AuthError) -> String {
        match err {
            AuthError::Validation(v) => v.message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn register(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: "Ayu".into(),
            email: "ayu@example.com".into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(message(LoginForm::new("", "secret").validate().unwrap_err()), MISSING_FIELDS);
        assert_eq!(message(LoginForm::new("a@b.c", "").validate().unwrap_err()), MISSING_FIELDS);
        assert!(LoginForm::new("a@b.c", "secret").validate().is_ok());
    }

    #[test]
    fn test_register_checks_in_order() {
        let empty = RegisterForm::default();
        assert_eq!(message(empty.validate().unwrap_err()), MISSING_FIELDS);

        // Mismatch is reported before length.
        assert_eq!(message(register("short", "other").validate().unwrap_err()), PASSWORD_MISMATCH);
        assert_eq!(message(register("short", "short").validate().unwrap_err()), PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_register_request_drops_confirmation() {
        let request = register("password1", "password1").into_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Ayu", "email": "ayu@example.com", "password": "password1"})
        );
    }
}
