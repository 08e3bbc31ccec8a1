//! storegen - use-store helper generator
//!
//! Scans a directory of store definition files and generates one aggregating
//! helper module (plus an optional type-declaration companion) exposing a
//! uniform `useStore` accessor. In watch mode the helper is regenerated
//! whenever store files are added or removed.

pub mod config;
pub mod debounce;
pub mod emit;
pub mod error;
pub mod filter;
pub mod fs;
pub mod generator;
pub mod paths;
pub mod scan;
pub mod watcher;

// Re-exports for convenience
pub use config::{BuildMode, OutputKind, Patterns, RawConfig, Settings};
pub use emit::{Artifact, Import};
pub use error::{StoregenError, StoregenResult};
pub use filter::{GlobFilter, StoreFilter};
pub use generator::{GenerationSummary, Generator};
pub use paths::ResolvedPaths;
pub use scan::StoreEntry;
pub use watcher::{watch, WatchEvent};
