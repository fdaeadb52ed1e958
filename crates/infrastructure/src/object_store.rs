use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Whole-document blob storage. The service only ever reads and rewrites
/// complete objects; there is no partial update at this layer.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the object's bytes, or `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the object wholesale.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError>;
}

/// Transient backend faults worth retrying, detected by error message the
/// same way the SDK surfaces them.
pub fn is_retryable(error: &StoreError) -> bool {
    let StoreError::Backend(message) = error else {
        return false;
    };

    const RETRYABLE: [&str; 4] = [
        "SlowDown",
        "InternalError",
        "ServiceUnavailable",
        "RequestTimeout",
    ];
    RETRYABLE.iter().any(|code| message.contains(code))
}
