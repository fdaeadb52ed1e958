use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::object_store::{ObjectStore, StoreError};

/// Process-local store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an object directly, bypassing the trait.
    pub fn seed(&self, key: &str, body: Vec<u8>) {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), body);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let objects = self.objects.lock().expect("store mutex poisoned");
        Ok(objects.get(key).cloned())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        let mut objects = self.objects.lock().expect("store mutex poisoned");
        objects.insert(key.to_string(), body);
        Ok(())
    }
}
