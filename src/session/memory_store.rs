//! In-memory token storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::repository::TokenStore;
use crate::{BearerToken, ClientError};

/// In-memory token storage.
///
/// Clones share the same map, so handing a clone to a second
/// [`SessionStore`](super::SessionStore) behaves like a process restart that
/// keeps its storage.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    entries: Arc<RwLock<HashMap<String, BearerToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token` under `key`.
    pub fn with_token(key: impl Into<String>, token: impl Into<BearerToken>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.into(), token.into());
        }
        store
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<BearerToken>, ClientError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ClientError::Storage("Lock poisoned".to_owned()))?;

        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, token: &BearerToken) -> Result<(), ClientError> {
        self.entries
            .write()
            .map_err(|_| ClientError::Storage("Lock poisoned".to_owned()))?
            .insert(key.to_owned(), token.clone());

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries
            .write()
            .map_err(|_| ClientError::Storage("Lock poisoned".to_owned()))?
            .remove(key);

        Ok(())
    }
}
