//! The generation pipeline
//!
//! A single linear sequence with no internal recovery: resolve paths,
//! enumerate store entries, render all artifacts, persist them. Any failure
//! aborts the run; rendering happens before the first write, so a run that
//! fails during enumeration leaves previously generated output untouched.

use std::path::PathBuf;

use crate::config::Settings;
use crate::emit;
use crate::error::StoregenResult;
use crate::filter::GlobFilter;
use crate::fs::write_atomic;
use crate::paths::ResolvedPaths;
use crate::scan;

/// Outcome of one successful generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Identifiers in enumeration order
    pub identifiers: Vec<String>,
    /// Paths written, implementation first
    pub written: Vec<PathBuf>,
}

/// Runs the generation pipeline for one finalized configuration.
///
/// The glob filter is built up front, so malformed patterns fail here
/// rather than on the first triggered run.
pub struct Generator {
    settings: Settings,
    paths: ResolvedPaths,
    filter: GlobFilter,
}

impl Generator {
    pub fn new(settings: Settings) -> StoregenResult<Self> {
        let filter = GlobFilter::new(&settings.include, &settings.exclude)?;
        let paths = ResolvedPaths::from_settings(&settings);
        Ok(Self {
            settings,
            paths,
            filter,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    /// Run one generation cycle.
    pub fn run(&self) -> StoregenResult<GenerationSummary> {
        let entries = scan::enumerate(&self.paths.store_dir, &self.filter)?;
        let artifacts = emit::render(&entries, &self.paths, self.settings.output_kind);

        for artifact in &artifacts {
            write_atomic(&artifact.path, &artifact.content)?;
        }

        Ok(GenerationSummary {
            identifiers: entries.into_iter().map(|e| e.identifier).collect(),
            written: artifacts.into_iter().map(|a| a.path).collect(),
        })
    }
}
