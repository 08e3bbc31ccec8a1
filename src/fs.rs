//! Filesystem write primitives
//!
//! Output files are written via the tempfile-then-rename pattern so a reader
//! never observes a half-written helper module. Missing ancestor directories
//! are created first.

use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{StoregenError, StoregenResult};

/// Write `content` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, content: &str) -> StoregenResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(parent).map_err(|e| StoregenError::WriteFailed {
        path: parent.to_path_buf(),
        source: e,
    })?;

    // Temp file lives in the target directory so the rename stays on one
    // filesystem.
    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| write_failed(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| write_failed(path, e))?;
    tmp.persist(path).map_err(|e| write_failed(path, e.error))?;

    Ok(())
}

fn write_failed(path: &Path, source: std::io::Error) -> StoregenError {
    StoregenError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}
