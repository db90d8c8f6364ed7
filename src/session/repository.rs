//! Token storage trait.

use async_trait::async_trait;

use crate::{BearerToken, ClientError};

/// Persistent key/value storage for the bearer token.
///
/// Plays the part browser local storage plays for a web client: the token
/// written here is what a later process picks up on start-up.
///
/// Implementations provide different storage backends:
/// - [`InMemoryTokenStore`](super::InMemoryTokenStore): in-memory storage for testing
/// - [`FileTokenStore`](super::FileTokenStore): file-based storage
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the token stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<BearerToken>, ClientError>;

    /// Stores `token` under `key`, replacing any previous value.
    async fn save(&self, key: &str, token: &BearerToken) -> Result<(), ClientError>;

    /// Removes the token stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), ClientError>;
}
