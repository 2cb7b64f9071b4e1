//! Route access checks.
//!
//! Decides, from the stored credentials alone, whether a storefront path may
//! be opened. The server still enforces the real permissions.

use crate::credentials::Credentials;

/// Login page that protected paths redirect to.
pub const LOGIN_PATH: &str = "/auth/login";

/// Outcome of checking a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    /// Not logged in; go to this login URL first.
    RedirectToLogin(String),
    /// Logged in without the admin role.
    Forbidden,
}

impl RouteAccess {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteAccess::Allow)
    }
}

/// Path prefixes that need a login, or an admin login.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected: Vec<String>,
    admin: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected: vec!["/orders".into(), "/checkout".into()],
            admin: vec!["/admin".into()],
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| path.starts_with(p.as_str()))
    }

    pub fn is_admin_only(&self, path: &str) -> bool {
        self.admin.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Check `path` against the stored credentials.
    pub fn check(&self, path: &str, credentials: Option<&Credentials>) -> RouteAccess {
        let admin_only = self.is_admin_only(path);
        if !admin_only && !self.is_protected(path) {
            return RouteAccess::Allow;
        }

        let Some(credentials) = credentials.filter(|c| !c.token.is_empty()) else {
            tracing::debug!(path, "no token, redirecting to login");
            return RouteAccess::RedirectToLogin(login_url(path));
        };

        if admin_only && !credentials.is_admin() {
            tracing::debug!(path, "non-admin user on admin path");
            return RouteAccess::Forbidden;
        }

        RouteAccess::Allow
    }
}

/// `/auth/login?redirect=<path>`, with the path query-encoded.
pub fn login_url(redirect: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, encode_query_value(redirect))
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, User};
    use freshcart_commerce::UserId;

    fn creds(role: Role) -> Credentials {
        Credentials::new(
            "tok",
            Some(User::new(UserId::new("u1"), "Ayu", "ayu@example.com", role)),
        )
    }

    #[test]
    fn test_public_paths_are_open() {
        let guard = RouteGuard::new();
        assert_eq!(guard.check("/menu", None), RouteAccess::Allow);
        assert_eq!(guard.check("/", None), RouteAccess::Allow);
    }

    #[test]
    fn test_protected_path_without_token_redirects() {
        let guard = RouteGuard::new();
        assert_eq!(
            guard.check("/checkout", None),
            RouteAccess::RedirectToLogin("/auth/login?redirect=%2Fcheckout".into())
        );
        assert!(matches!(
            guard.check("/admin/products", None),
            RouteAccess::RedirectToLogin(_)
        ));
    }

    #[test]
    fn test_customer_on_admin_path_is_forbidden() {
        let guard = RouteGuard::new();
        assert_eq!(
            guard.check("/admin", Some(&creds(Role::Customer))),
            RouteAccess::Forbidden
        );
        assert!(guard.check("/admin", Some(&creds(Role::Admin))).is_allowed());
        assert!(guard.check("/orders", Some(&creds(Role::Customer))).is_allowed());
    }

    #[test]
    fn test_token_without_saved_user_is_not_admin() {
        let guard = RouteGuard::new();
        let creds = Credentials::new("tok", None);
        assert!(guard.check("/orders/123", Some(&creds)).is_allowed());
        assert_eq!(guard.check("/admin/stats", Some(&creds)), RouteAccess::Forbidden);
    }
}
