//! Capability-scoped dataset file reads.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};

use crate::error::DatasetError;

/// Read a dataset file through a handle on its parent directory.
pub(crate) fn read_dataset(path: &Utf8Path) -> Result<String, DatasetError> {
    let io_error = |message: String| DatasetError::IoError {
        path: path.to_path_buf(),
        message,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| io_error("dataset path must name a file".to_owned()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let dir = Dir::open_ambient_dir(&parent, ambient_authority())
        .map_err(|err| io_error(err.to_string()))?;
    dir.read_to_string(file_name)
        .map_err(|err| io_error(err.to_string()))
}
