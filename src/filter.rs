//! Include/exclude filtering of store directory entries
//!
//! The enumerator only depends on the `StoreFilter` capability; `GlobFilter`
//! is the glob-backed implementation. Pattern errors surface here, at
//! construction time, so a malformed glob fails fast instead of per-file.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{StoregenError, StoregenResult};

/// Decides whether a directory entry is selected for generation.
pub trait StoreFilter {
    fn is_selected(&self, path: &Path) -> bool;
}

/// Combined include/exclude glob filter. Exclude takes precedence: an entry
/// matching both sets is dropped.
#[derive(Debug)]
pub struct GlobFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl GlobFilter {
    pub fn new(include: &[String], exclude: &[String]) -> StoregenResult<Self> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
        })
    }
}

impl StoreFilter for GlobFilter {
    fn is_selected(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_set(patterns: &[String]) -> StoregenResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|e| StoregenError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| StoregenError::InvalidPattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}
