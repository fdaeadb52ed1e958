use std::sync::Arc;

use domain::TodoList;
use shared::UserDid;
use tracing::warn;

use crate::object_store::{is_retryable, ObjectStore, StoreError};
use crate::retry::{retry_with_backoff, RetryConfig};

/// Fixed document name; the caller's DID prefixes it so each user gets an
/// isolated list.
const TODO_LIST_KEY: &str = "todo-list.json";

/// Loads and rewrites one user's whole todo list as a single JSON document.
/// Concurrent writers are not coordinated: last writer wins.
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn ObjectStore>,
    retry: RetryConfig,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(store: Arc<dyn ObjectStore>, retry: RetryConfig) -> Self {
        Self { store, retry }
    }

    fn document_key(user: &UserDid) -> String {
        format!("{}/{}", user.as_str(), TODO_LIST_KEY)
    }

    /// A missing or unreadable document loads as the empty list; the fault
    /// is logged and the request proceeds.
    pub async fn load(&self, user: &UserDid) -> TodoList {
        let key = Self::document_key(user);

        let bytes = match self.store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return TodoList::default(),
            Err(error) => {
                warn!(key = %key, error = %error, "Failed to load todo list, starting empty");
                return TodoList::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(list) => list,
            Err(error) => {
                warn!(key = %key, error = %error, "Corrupt todo list document, starting empty");
                TodoList::default()
            }
        }
    }

    /// Replaces the stored document. Transient backend faults are retried
    /// with backoff before the error is surfaced.
    pub async fn save(&self, user: &UserDid, list: &TodoList) -> Result<(), StoreError> {
        let key = Self::document_key(user);
        let body =
            serde_json::to_vec(list).map_err(|e| StoreError::Serialization(e.to_string()))?;

        retry_with_backoff(
            || self.store.put(&key, body.clone()),
            &self.retry,
            is_retryable,
        )
        .await
    }
}
