//! Directory-backed key-value store.
//!
//! Each key maps to `<key>.json` inside a single directory opened through
//! `cap-std`, so the adapter cannot reach outside it. Writes go to a hidden
//! temporary file which is then renamed over the target, so readers see
//! either the old or the new value, never a partial one.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store persisting each key as a JSON file.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl DirectoryKeyValueStore {
    /// Open `root`, creating it and any missing parents.
    pub fn open(root: &Utf8Path) -> Result<Self, KeyValueStoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(root, ambient_authority()))
            .map(|dir| Self {
                dir,
                root: root.to_path_buf(),
            })
            .map_err(|err| KeyValueStoreError::unavailable(format!("{root}: {err}")))
    }

    /// Directory holding the ledger files.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<String, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(format!("{key}.json"))
        } else {
            Err(KeyValueStoreError::invalid_key(key))
        }
    }

    fn temp_name(file_name: &str) -> String {
        format!(".{file_name}.tmp.{}", Uuid::new_v4().simple())
    }

    fn write_temp(&self, tmp_name: &str, value: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(value)?;
        file.sync_all()
    }

    #[cfg(windows)]
    fn replace(&self, tmp_name: &str, file_name: &str) -> io::Result<()> {
        // Windows refuses to rename over an existing file.
        match self.dir.remove_file(file_name) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, file_name)
    }

    #[cfg(not(windows))]
    fn replace(&self, tmp_name: &str, file_name: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, file_name)
    }

    fn sync_directory(&self) {
        if let Err(err) = self.dir.open(".").and_then(|handle| handle.sync_all()) {
            debug!(root = %self.root, error = %err, "directory sync skipped");
        }
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KeyValueStoreError> {
        let file_name = Self::file_name(key)?;
        match self.dir.read(&file_name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::read(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KeyValueStoreError> {
        let file_name = Self::file_name(key)?;
        let tmp_name = Self::temp_name(&file_name);

        let written = self
            .write_temp(&tmp_name, value)
            .and_then(|()| self.replace(&tmp_name, &file_name));
        if let Err(err) = written {
            if let Err(cleanup) = self.dir.remove_file(&tmp_name) {
                debug!(file = %tmp_name, error = %cleanup, "temporary file cleanup skipped");
            }
            return Err(KeyValueStoreError::write(key, err.to_string()));
        }

        self.sync_directory();
        Ok(())
    }
}
