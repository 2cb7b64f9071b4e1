//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use freshcart_auth::{CredentialStore, RouteAccess, RouteGuard};
use freshcart_storefront::{CheckoutService, HttpStorefront};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;
use crate::session::SessionStore;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd, &output).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path, output: &Output) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => output.warn(&format!("Skipping {:#}", e)),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the session directory.
    pub fn session_dir(&self) -> PathBuf {
        match &self.config.session.dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("freshcart").join("session"),
        }
    }

    /// Open the session store.
    pub fn session(&self) -> Result<SessionStore> {
        let dir = self.session_dir();
        SessionStore::open(&dir)
            .with_context(|| format!("Failed to open session directory: {}", dir.display()))
    }

    /// API client bound to the session's credentials.
    pub fn storefront(&self) -> Result<Arc<HttpStorefront>> {
        let config = self.config.storefront();
        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "storefront client");
        let credentials: Arc<dyn CredentialStore> = Arc::new(self.session()?);
        Ok(Arc::new(HttpStorefront::new(config.client(), credentials)))
    }

    /// Checkout service using the configured fee rules and any pending
    /// idempotency key from an earlier attempt.
    pub fn checkout_service(&self, session: &SessionStore) -> Result<CheckoutService> {
        let keys = session
            .load_checkout_keys()
            .context("Failed to read pending checkout")?;
        Ok(
            CheckoutService::with_fees(self.storefront()?, self.config.pricing.fee_schedule())
                .with_keys(keys),
        )
    }

    /// Refuse to continue unless the stored credentials may open `path`.
    pub fn require_access(&self, path: &str) -> Result<()> {
        let store = self.session()?;
        let credentials = store.load()?;
        match RouteGuard::new().check(path, credentials.as_ref()) {
            RouteAccess::Allow => Ok(()),
            RouteAccess::RedirectToLogin(url) => {
                self.output.debug(&format!("Redirect: {}", url));
                bail!("Please log in first: run `freshcart auth login`.")
            }
            RouteAccess::Forbidden => bail!("You do not have access to this page."),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
