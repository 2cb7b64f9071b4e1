//! Authentication module for FreshCart.
//!
//! Users and roles, the stored bearer token, login/registration forms and
//! route access checks. Tokens are issued and verified by the API.

mod credentials;
mod error;
mod forms;
mod guard;
mod user;

pub use credentials::{AuthResponse, CredentialStore, Credentials, MemoryCredentialStore};
pub use error::AuthError;
pub use forms::{
    LoginForm, RegisterForm, RegisterRequest, LOGIN_FAILED, MIN_PASSWORD_LEN, MISSING_FIELDS,
    PASSWORD_MISMATCH, PASSWORD_TOO_SHORT, REGISTRATION_FAILED,
};
pub use guard::{login_url, RouteAccess, RouteGuard, LOGIN_PATH};
pub use user::{Role, User};
