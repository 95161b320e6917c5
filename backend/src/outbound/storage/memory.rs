//! Process-local key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Thread-safe in-memory store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no key has been written.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic mid-insert cannot leave a half-written entry, so the map is
        // still consistent after poisoning.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KeyValueStoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KeyValueStoreError> {
        self.lock().insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}
