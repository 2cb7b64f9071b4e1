//! File-backed session storage.
//!
//! Each value is a JSON file in the session directory. The cart and the
//! credentials survive between invocations until cleared.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use freshcart_auth::{AuthError, CredentialStore, Credentials};
use freshcart_commerce::cart::{Cart, CartSession};
use freshcart_commerce::checkout::IdempotencyKeys;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const CART_KEY: &str = "cart";
const CREDENTIALS_KEY: &str = "credentials";
const CHECKOUT_KEY: &str = "checkout";

/// Session storage errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt session file: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SessionError> for AuthError {
    fn from(e: SessionError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

/// JSON files in one directory, addressed by key.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Get a value. Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a value atomically. Files are readable by the owner only,
    /// since one of them holds the bearer token.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(value)?;

        let mut file = NamedTempFile::new_in(&self.dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        file.persist(self.path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    /// Delete a value. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The saved cart, or a fresh session.
    pub fn load_cart(&self) -> Result<CartSession, SessionError> {
        let cart: Option<Cart> = self.get(CART_KEY)?;
        tracing::debug!(dir = %self.dir.display(), found = cart.is_some(), "loaded cart");
        Ok(cart.map(CartSession::from_cart).unwrap_or_default())
    }

    /// Persist the cart. An empty cart removes the file.
    pub fn save_cart(&self, session: &CartSession) -> Result<(), SessionError> {
        if session.cart().is_empty() {
            return self.delete(CART_KEY);
        }
        self.set(CART_KEY, session.cart())
    }

    /// Idempotency key of an unfinished checkout, if any.
    pub fn load_checkout_keys(&self) -> Result<IdempotencyKeys, SessionError> {
        Ok(self.get(CHECKOUT_KEY)?.unwrap_or_default())
    }

    pub fn save_checkout_keys(&self, keys: &IdempotencyKeys) -> Result<(), SessionError> {
        if keys.is_pending() {
            self.set(CHECKOUT_KEY, keys)
        } else {
            self.delete(CHECKOUT_KEY)
        }
    }
}

impl CredentialStore for SessionStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        Ok(self.get(CREDENTIALS_KEY)?)
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        Ok(self.set(CREDENTIALS_KEY, credentials)?)
    }

    fn clear(&self) -> Result<(), AuthError> {
        Ok(self.delete(CREDENTIALS_KEY)?)
    }
}
