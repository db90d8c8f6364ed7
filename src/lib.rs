//! Session-aware client for the storefront REST API.
//!
//! The crate is built around one explicit [`Storefront`] object that owns a
//! [`SessionStore`] (bearer token, decoded claims, current user) and an
//! [`ApiClient`] (the only path network calls go through).
//!
//! ```rust,ignore
//! use storefront_client::{ClientConfig, FileTokenStore, Storefront};
//!
//! let store = FileTokenStore::new("/var/lib/storefront")?;
//! let storefront = Storefront::new(ClientConfig::default(), store)?;
//!
//! storefront.init().await;
//! if storefront.session().is_admin() {
//!     let orders = storefront.api().get_all_orders().await?;
//! }
//! ```

pub mod actions;
pub mod api;
pub mod claims;
pub mod config;
pub mod events;
pub mod session;
mod storefront;
mod token;

#[cfg(test)]
mod test_support;

use std::fmt;

pub use api::{
    ApiClient, FilePart, HeadlessNavigator, Navigator, RequestBody, RequestOptions,
    ReqwestTransport, Transport,
};
pub use claims::{TokenClaims, UserRole, decode};
pub use config::ClientConfig;
pub use events::{Listener, SessionEvent, SignOutReason};
pub use session::{
    FileTokenStore, InMemoryTokenStore, SessionSnapshot, SessionState, SessionStore, TokenStore,
    UserProfile,
};
pub use storefront::Storefront;
pub use token::BearerToken;

#[cfg(any(test, feature = "mocks"))]
pub use api::MockTransport;

/// Errors surfaced by the storefront client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The bearer token could not be decoded into claims.
    Decode(String),
    /// The server answered with a non-success status.
    Request { status: u16, message: String },
    /// The request never produced an HTTP response.
    Network(String),
    /// The persisted token could not be read or written.
    Storage(String),
    /// A request or response body could not be (de)serialized.
    Serialization(String),
    Configuration(String),
}

impl ClientError {
    /// Builds a request error from a status code and message.
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status for request errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl std::error::Error for ClientError {}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Invalid token: {msg}"),
            Self::Request { message, .. } => write!(f, "{message}"),
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}
