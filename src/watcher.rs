//! File watcher for continuous regeneration
//!
//! Watches the store directory for file creation and removal, the only
//! events that change the identifier set; edits inside an existing store
//! file do not trigger regeneration. Events are debounced (100ms default)
//! so a save burst collapses into a single run. Generation runs
//! synchronously on the watch thread, so runs never overlap.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::debounce::Debouncer;
use crate::error::{StoregenError, StoregenResult};
use crate::generator::Generator;
use crate::scan::is_store_source;

/// Channel poll interval while waiting for filesystem events
const POLL_INTERVAL_MS: u64 = 50;

/// Watch event types for NDJSON output
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started { store_dir: String },
    FileChanged { path: String },
    Generated { stores: usize, artifacts: usize },
    Error { message: String },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        match self {
            WatchEvent::Started { store_dir } => {
                format!(r#"{{"event":"started","store_dir":"{}"}}"#, store_dir)
            }
            WatchEvent::FileChanged { path } => {
                format!(r#"{{"event":"file_changed","path":"{}"}}"#, path)
            }
            WatchEvent::Generated { stores, artifacts } => {
                format!(
                    r#"{{"event":"generated","stores":{},"artifacts":{}}}"#,
                    stores, artifacts
                )
            }
            WatchEvent::Error { message } => {
                format!(
                    r#"{{"event":"error","message":"{}"}}"#,
                    message.replace('"', "\\\"")
                )
            }
            WatchEvent::Shutdown => r#"{"event":"shutdown"}"#.to_string(),
        }
    }
}

/// Watch the store directory and regenerate on membership changes.
///
/// Performs an initial generation run first; a failure there is fatal, the
/// same way the build-start trigger is. Failures of watch-triggered runs are
/// surfaced through the callback and the loop keeps running.
pub fn watch(
    generator: &Generator,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> StoregenResult<()> {
    let store_dir = generator.paths().store_dir.clone();

    event_callback(WatchEvent::Started {
        store_dir: store_dir.display().to_string(),
    });

    do_generate(generator, &event_callback)?;

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Only creation and removal change the identifier set.
                if matches!(event.kind, EventKind::Create(_) | EventKind::Remove(_)) {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            }
        },
        Config::default(),
    )
    .map_err(notify_io_error)?;

    // Enumeration is non-recursive, so the watch is too.
    watcher
        .watch(&store_dir, RecursiveMode::NonRecursive)
        .map_err(notify_io_error)?;

    let mut debouncer = Debouncer::new(generator.settings().debounce);

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(POLL_INTERVAL_MS)) {
            if qualifies(&path, &store_dir) {
                event_callback(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });
                debouncer.record_event();
            }
        }

        if debouncer.take() {
            if let Err(e) = do_generate(generator, &event_callback) {
                event_callback(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// A qualifying event lies under the watched directory and carries a
/// recognized source extension.
fn qualifies(path: &Path, store_dir: &Path) -> bool {
    path.starts_with(store_dir) && is_store_source(path)
}

fn do_generate(generator: &Generator, callback: &impl Fn(WatchEvent)) -> StoregenResult<()> {
    let summary = generator.run()?;

    callback(WatchEvent::Generated {
        stores: summary.identifiers.len(),
        artifacts: summary.written.len(),
    });

    Ok(())
}

fn notify_io_error(e: notify::Error) -> StoregenError {
    StoregenError::Io(std::io::Error::other(e.to_string()))
}
