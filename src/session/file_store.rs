//! File-based token storage.
//!
//! Stores each key as a JSON file in a directory.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::TokenStore;
use crate::{BearerToken, ClientError};

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: BearerToken,
    saved_at: DateTime<Utc>,
}

/// File-based token storage.
///
/// Each key is stored as a JSON file named `{key}.json` in the configured
/// directory, so the token survives process restarts.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_client::FileTokenStore;
///
/// let store = FileTokenStore::new("/home/me/.storefront")?;
/// ```
pub struct FileTokenStore {
    directory: PathBuf,
}

impl FileTokenStore {
    /// Creates a new file token store.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ClientError::Storage(format!("Failed to create token directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

/// Keys become file names, so only plain identifiers are accepted.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, key: &str) -> Result<Option<BearerToken>, ClientError> {
        if !is_valid_key(key) {
            return Ok(None);
        }

        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ClientError::Storage(format!("Failed to read token file: {e}")))?;

        let stored: StoredToken = serde_json::from_str(&content)
            .map_err(|e| ClientError::Storage(format!("Failed to parse token file: {e}")))?;

        Ok(Some(stored.token))
    }

    async fn save(&self, key: &str, token: &BearerToken) -> Result<(), ClientError> {
        if !is_valid_key(key) {
            return Err(ClientError::Storage(format!("Invalid storage key {key:?}")));
        }

        let stored = StoredToken {
            token: token.clone(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored)
            .map_err(|e| ClientError::Serialization(format!("Failed to serialize token: {e}")))?;

        std::fs::write(self.entry_path(key), content)
            .map_err(|e| ClientError::Storage(format!("Failed to write token file: {e}")))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        if !is_valid_key(key) {
            return Ok(());
        }

        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                ClientError::Storage(format!("Failed to delete token file: {e}"))
            })?;
        }

        Ok(())
    }
}
