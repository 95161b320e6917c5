//! Driven port for the per-user ledger blob store.
//!
//! The store is a flat namespace of string keys holding opaque bytes. The
//! ledger writes one JSON array per key and never deletes keys.

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The backing medium could not be reached.
        Unavailable { message } =>
            "key-value store unavailable: {message}",
        /// Reading a key failed.
        Read { key, message } =>
            "failed to read {key}: {message}",
        /// Writing a key failed.
        Write { key, message } =>
            "failed to write {key}: {message}",
        /// The key cannot be represented by this adapter.
        InvalidKey { key } =>
            "invalid store key: {key}",
    }
}

/// Synchronous key-value capability.
///
/// Implementations must make a completed `set` visible to every later
/// `get` for the same key, including `get`s issued through another handle
/// to the same medium.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KeyValueStoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KeyValueStoreError>;
}
