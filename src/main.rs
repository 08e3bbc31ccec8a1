//! storegen CLI - use-store helper generator
//!
//! Usage: storegen <COMMAND>
//!
//! Commands:
//!   generate  Generate the helper module once (or stay resident in dev mode)
//!   watch     Watch the store directory and regenerate continuously

mod cli;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands, GenerateOptions};
use storegen::{watch, BuildMode, Generator, Patterns, RawConfig, Settings, WatchEvent};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            options,
            mode,
            watch,
            no_watch,
        } => {
            let watch_override = if watch {
                Some(true)
            } else if no_watch {
                Some(false)
            } else {
                None
            };
            run(options, mode, watch_override, cli.json, cli.verbose)
        }
        Commands::Watch { options } => {
            run(options, BuildMode::Development, Some(true), cli.json, cli.verbose)
        }
    }
}

fn run(
    options: GenerateOptions,
    mode: BuildMode,
    watch_override: Option<bool>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let root = match options.root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let (file_config, warnings) = RawConfig::load_or_default(&root)?;
    for warning in &warnings {
        let line = warning.line.map(|l| format!(":{l}")).unwrap_or_default();
        eprintln!(
            "warning: unknown config key '{}' in {}{}",
            warning.key,
            warning.file.display(),
            line
        );
    }

    let flags = RawConfig {
        store_dir: options.store_dir,
        include: options.include.map(Patterns::Many),
        exclude: options.exclude.map(Patterns::Many),
        output: options.output,
        output_type: options.output_type,
        watch: watch_override,
        debounce_ms: options.debounce_ms,
    };

    let settings = Settings::finalize(file_config.merge(flags), root, mode);
    let watch_enabled = settings.watch_enabled;
    let generator = Generator::new(settings)?;

    if !watch_enabled {
        let summary = generator.run()?;

        if json {
            println!(
                "{}",
                WatchEvent::Generated {
                    stores: summary.identifiers.len(),
                    artifacts: summary.written.len(),
                }
                .to_json()
            );
        } else {
            for path in &summary.written {
                println!("Generated {}", path.display());
            }
            if verbose > 0 {
                for identifier in &summary.identifiers {
                    println!("  store: {identifier}");
                }
            }
        }
        return Ok(());
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    watch(&generator, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            println!("{}", render_event(&event));
        }
    })?;

    Ok(())
}

fn render_event(event: &WatchEvent) -> String {
    let ts = timestamp();
    match event {
        WatchEvent::Started { store_dir } => format!("[{ts}] watching {store_dir}"),
        WatchEvent::FileChanged { path } => format!("[{ts}] changed {path}"),
        WatchEvent::Generated { stores, artifacts } => {
            format!("[{ts}] generated {stores} store(s), {artifacts} file(s)")
        }
        WatchEvent::Error { message } => format!("[{ts}] error: {message}"),
        WatchEvent::Shutdown => format!("[{ts}] stopped"),
    }
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            format!("{:02}:{:02}:{:02}", h, m, s)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
