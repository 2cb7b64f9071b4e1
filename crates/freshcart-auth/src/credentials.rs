//! Stored credentials.

use crate::user::User;
use crate::AuthError;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Bearer token plus the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Credentials {
    fn from(r: AuthResponse) -> Self {
        Credentials::new(r.token, Some(r.user))
    }
}

/// Where the token and saved user live between requests.
///
/// Token and user are stored and cleared together.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credentials, if any.
    fn load(&self) -> Result<Option<Credentials>, AuthError>;

    /// Replace the stored credentials.
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;

    /// Forget the token and the saved user.
    fn clear(&self) -> Result<(), AuthError>;

    /// The stored bearer token. Unreadable storage counts as logged out.
    fn token(&self) -> Option<String> {
        self.load().ok().flatten().map(|c| c.token)
    }

    /// The saved user.
    fn user(&self) -> Option<User> {
        self.load().ok().flatten().and_then(|c| c.user)
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

/// Credential store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out logged in.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}
