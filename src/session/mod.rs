//! Session state: the bearer token, its decoded claims and the current user.
//!
//! ```text
//! Unauthenticated ──login/register/restore──▶ Authenticated(role)
//!        ▲                                          │
//!        └──── logout | expiry | decode failure | 401 ┘
//! ```
//!
//! There is no refresh transition: an expired token always ends the session.

mod file_store;
mod memory_store;
mod profile;
mod repository;
mod store;

pub use file_store::FileTokenStore;
pub use memory_store::InMemoryTokenStore;
pub use profile::UserProfile;
pub use repository::TokenStore;
pub use store::SessionStore;

use crate::{BearerToken, TokenClaims, UserRole};

/// Where the session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { role: UserRole },
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub token: Option<BearerToken>,
    pub claims: Option<TokenClaims>,
    pub user: Option<UserProfile>,
    pub is_admin: bool,
}

impl SessionSnapshot {
    pub fn state(&self) -> SessionState {
        if self.token.is_none() {
            return SessionState::Unauthenticated;
        }
        let role = if self.is_admin {
            UserRole::Admin
        } else {
            UserRole::Client
        };
        SessionState::Authenticated { role }
    }

    /// True when nothing at all is held: no token, claims or user.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.claims.is_none() && self.user.is_none() && !self.is_admin
    }
}
