//! Configuration for storegen
//!
//! Configuration goes through two explicit stages:
//! 1. `RawConfig` — what the user wrote (`storegen.toml` merged with CLI flags)
//! 2. `Settings` — finalized once the project root and build mode are known
//!
//! `Settings` is immutable after `finalize`; nothing patches it afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StoregenError, StoregenResult};

/// Default directory scanned for store definition files
pub const DEFAULT_STORE_DIR: &str = "src/store";

/// Default output path for the generated helper module
pub const DEFAULT_OUTPUT: &str = "src/helper/use-store.ts";

/// Default include pattern for store definition files
pub const DEFAULT_INCLUDE: &str = "**/*.{ts,js}";

/// Default exclude pattern (the directory's own index module)
pub const DEFAULT_EXCLUDE: &str = "**/index.{ts,js}";

/// Default debounce window for watch-triggered regeneration
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Name of the config file looked up at the project root
pub const CONFIG_FILE_NAME: &str = "storegen.toml";

/// Build mode of the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

/// Output flavor: one combined module, or implementation + declaration pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Ts,
    Js,
}

impl OutputKind {
    /// Infer the output kind from the configured output path.
    ///
    /// A `.js` extension selects split mode; anything else (including no
    /// extension at all) falls back to combined `.ts` mode. Inference never
    /// fails — ambiguity resolves to `Ts`.
    pub fn infer(output: &Path) -> Self {
        match output.extension().and_then(|e| e.to_str()) {
            Some("js") => OutputKind::Js,
            _ => OutputKind::Ts,
        }
    }

    /// File extension forced onto the resolved output path
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Ts => "ts",
            OutputKind::Js => "js",
        }
    }
}

/// A glob option that accepts either a single pattern or a list.
///
/// Supports both forms:
///   include = "**/*.ts"
///   include = ["**/*.ts", "**/*.js"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Patterns::One(p) => vec![p],
            Patterns::Many(ps) => ps,
        }
    }
}

/// Raw user configuration, as written in `storegen.toml` or passed as flags.
///
/// Every field is optional; defaults are applied during finalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RawConfig {
    /// Directory scanned for store definition files
    pub store_dir: Option<PathBuf>,

    /// Entries must match to be considered
    pub include: Option<Patterns>,

    /// Entries matching are dropped regardless of include
    pub exclude: Option<Patterns>,

    /// Base output path; extension may be overridden by `output-type`
    pub output: Option<PathBuf>,

    /// Selects combined (`ts`) vs. split (`js`) render mode
    pub output_type: Option<OutputKind>,

    /// Enables the watch trigger (defaults to true in development mode)
    pub watch: Option<bool>,

    /// Debounce window in milliseconds for watch-triggered regeneration
    pub debounce_ms: Option<u64>,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

impl RawConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StoregenResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StoregenResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| StoregenError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    line: find_line_number(&content, &key),
                    key,
                    file: path.to_path_buf(),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load `storegen.toml` from the project root, or defaults if absent.
    pub fn load_or_default(project_root: &Path) -> StoregenResult<(Self, Vec<ConfigWarning>)> {
        let config_path = project_root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_with_warnings(&config_path)
        } else {
            Ok((Self::default(), Vec::new()))
        }
    }

    /// Merge another raw config on top of this one; `other`'s set fields win.
    ///
    /// Used to layer CLI flags over the config file.
    pub fn merge(self, other: RawConfig) -> Self {
        Self {
            store_dir: other.store_dir.or(self.store_dir),
            include: other.include.or(self.include),
            exclude: other.exclude.or(self.exclude),
            output: other.output.or(self.output),
            output_type: other.output_type.or(self.output_type),
            watch: other.watch.or(self.watch),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
        }
    }
}

/// Finalized, immutable settings for generation runs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_root: PathBuf,
    pub mode: BuildMode,
    pub store_dir: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub output: PathBuf,
    pub output_kind: OutputKind,
    pub watch_enabled: bool,
    pub debounce: Duration,
}

impl Settings {
    /// Finalize raw configuration once host context is available.
    ///
    /// Applies defaults, resolves `output_kind` (explicit setting wins over
    /// extension inference), and derives the watch default from the build
    /// mode. The result never changes after this point.
    pub fn finalize(raw: RawConfig, project_root: PathBuf, mode: BuildMode) -> Self {
        let output = raw.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let output_kind = raw
            .output_type
            .unwrap_or_else(|| OutputKind::infer(&output));
        let watch_enabled = raw.watch.unwrap_or(mode == BuildMode::Development);

        Self {
            project_root,
            mode,
            store_dir: raw
                .store_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            include: raw
                .include
                .map(Patterns::into_vec)
                .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]),
            exclude: raw
                .exclude
                .map(Patterns::into_vec)
                .unwrap_or_else(|| vec![DEFAULT_EXCLUDE.to_string()]),
            output,
            output_kind,
            watch_enabled,
            debounce: Duration::from_millis(raw.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}
