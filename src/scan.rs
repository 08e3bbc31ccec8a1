//! Store directory enumeration
//!
//! Lists the direct entries of the store directory (subdirectories are not
//! descended into), applies the include/exclude filter, and strips the
//! recognized source extension to derive each entry's identifier. Ordering
//! follows the filesystem listing and is not sorted, so identifier order may
//! vary across platforms; consumers only rely on membership.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{StoregenError, StoregenResult};
use crate::filter::StoreFilter;

/// Extensions recognized as store definition sources
const RECOGNIZED_EXTENSIONS: &[&str] = &["ts", "js"];

/// One discovered store definition file.
///
/// `identifier` is the filename minus its recognized extension and is used
/// verbatim as an import binding name and property key in generated text.
/// Filenames are assumed to already be valid identifiers once stripped; no
/// sanitization is applied (a name like `my-store.ts` produces an invalid
/// binding downstream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub identifier: String,
    pub source_file_name: String,
}

/// Whether a path carries a recognized store source extension.
pub fn is_store_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(&ext))
}

/// Enumerate store entries under `store_dir`.
///
/// Filtering happens before identifier derivation: the filter sees the full
/// absolute path (extension included), and only surviving entries have their
/// extension stripped. Duplicate identifiers (e.g. `user.ts` next to
/// `user.js`) keep the first listing occurrence.
pub fn enumerate(store_dir: &Path, filter: &dyn StoreFilter) -> StoregenResult<Vec<StoreEntry>> {
    if !store_dir.is_dir() {
        return Err(StoregenError::DirectoryNotFound {
            path: store_dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for dir_entry in fs::read_dir(store_dir)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();

        if path.is_dir() {
            continue;
        }
        if !filter.is_selected(&path) {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let identifier = strip_recognized_extension(file_name);
        if seen.insert(identifier.clone()) {
            entries.push(StoreEntry {
                identifier,
                source_file_name: file_name.to_string(),
            });
        }
    }

    Ok(entries)
}

fn strip_recognized_extension(file_name: &str) -> String {
    for ext in RECOGNIZED_EXTENSIONS {
        if let Some(stem) = file_name.strip_suffix(&format!(".{ext}")) {
            return stem.to_string();
        }
    }
    // Filter already approved the entry; keep the name as-is.
    file_name.to_string()
}
