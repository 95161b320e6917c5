//! Key-value store adapters for the ledger.
//!
//! - [`InMemoryKeyValueStore`]: process-local map, used by tests and by
//!   servers started without a ledger directory.
//! - [`DirectoryKeyValueStore`]: one `<key>.json` file per key inside a
//!   capability directory, replaced atomically on every write.

mod directory;
mod memory;

pub use directory::DirectoryKeyValueStore;
pub use memory::InMemoryKeyValueStore;
