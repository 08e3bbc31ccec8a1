//! Path resolution for generation runs
//!
//! Pure path arithmetic, no I/O. Resolves the configured store directory and
//! output path against the project root, applies the `output_kind`-driven
//! extension normalization, and computes the relative import prefix embedded
//! in generated text. Emitted specifiers always use forward slashes so the
//! generated module is valid no matter which platform ran the generator.

use std::path::{Component, Path, PathBuf};

use crate::config::{OutputKind, Settings};

/// Extension suffix of the companion type-declaration artifact
const DECLARATION_EXTENSION: &str = "d.ts";

/// Absolute paths and the relative import prefix for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory scanned for store definition files
    pub store_dir: PathBuf,
    /// Implementation artifact, extension forced by `output_kind`
    pub output_file: PathBuf,
    /// Declaration artifact; only present in split (`js`) mode
    pub declaration_file: Option<PathBuf>,
    /// Parent directory of the output file
    pub output_dir: PathBuf,
    /// Relative module specifier from the output directory to the store
    /// directory, forward-slash form, always `./`- or `../`-prefixed
    pub import_prefix: String,
}

impl ResolvedPaths {
    /// Resolve all paths for a run. Cannot fail for well-formed settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let root = &settings.project_root;
        let store_dir = resolve_path(root, &settings.store_dir);

        // The configured extension is advisory; the resolved kind wins.
        let output_file =
            resolve_path(root, &settings.output).with_extension(settings.output_kind.extension());

        let declaration_file = match settings.output_kind {
            OutputKind::Js => Some(output_file.with_extension(DECLARATION_EXTENSION)),
            OutputKind::Ts => None,
        };

        let output_dir = output_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.clone());

        let import_prefix = import_prefix(&output_dir, &store_dir);

        Self {
            store_dir,
            output_file,
            declaration_file,
            output_dir,
            import_prefix,
        }
    }
}

/// Resolve a configured path against the project root.
///
/// Absolute inputs are taken as-is; relative inputs are joined to the root.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Lexical relative path from `from` (a directory) to `to`.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Compute the module specifier from the output directory to the store
/// directory: forward slashes regardless of the native separator, with a
/// `./` prefix when the path does not already start with a dot segment.
pub fn import_prefix(output_dir: &Path, store_dir: &Path) -> String {
    let rel = relative_path(output_dir, store_dir);
    let specifier = to_forward_slashes(&rel);

    if specifier.is_empty() {
        ".".to_string()
    } else if specifier.starts_with("./") || specifier.starts_with("../") || specifier == ".." {
        specifier
    } else {
        format!("./{specifier}")
    }
}

/// Join path components with `/` independent of the host separator.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildMode, RawConfig};

    fn settings(raw: RawConfig) -> Settings {
        Settings::finalize(raw, PathBuf::from("/project"), BuildMode::Production)
    }

    #[test]
    fn test_resolve_path_relative_joins_root() {
        let resolved = resolve_path(Path::new("/project"), Path::new("src/store"));
        assert_eq!(resolved, PathBuf::from("/project/src/store"));
    }

    #[test]
    fn test_resolve_path_absolute_passthrough() {
        let resolved = resolve_path(Path::new("/project"), Path::new("/elsewhere/store"));
        assert_eq!(resolved, PathBuf::from("/elsewhere/store"));
    }

    #[test]
    fn test_output_extension_forced_by_kind() {
        let raw = RawConfig {
            output: Some(PathBuf::from("src/helper/use-store.js")),
            output_type: Some(crate::config::OutputKind::Ts),
            ..Default::default()
        };
        let paths = ResolvedPaths::from_settings(&settings(raw));

        assert_eq!(
            paths.output_file,
            PathBuf::from("/project/src/helper/use-store.ts")
        );
        assert!(paths.declaration_file.is_none());
    }

    #[test]
    fn test_declaration_sibling_in_split_mode() {
        let raw = RawConfig {
            output: Some(PathBuf::from("src/helper/use-store.js")),
            ..Default::default()
        };
        let paths = ResolvedPaths::from_settings(&settings(raw));

        assert_eq!(
            paths.output_file,
            PathBuf::from("/project/src/helper/use-store.js")
        );
        assert_eq!(
            paths.declaration_file,
            Some(PathBuf::from("/project/src/helper/use-store.d.ts"))
        );
    }

    #[test]
    fn test_import_prefix_walks_up() {
        let prefix = import_prefix(
            Path::new("/project/src/helper"),
            Path::new("/project/src/store"),
        );
        assert_eq!(prefix, "../store");
    }

    #[test]
    fn test_import_prefix_gets_current_dir_marker() {
        let prefix = import_prefix(Path::new("/project/src"), Path::new("/project/src/store"));
        assert_eq!(prefix, "./store");
    }

    #[test]
    fn test_import_prefix_same_directory() {
        let prefix = import_prefix(Path::new("/project/src/store"), Path::new("/project/src/store"));
        assert_eq!(prefix, ".");
    }

    #[test]
    fn test_import_prefix_uses_forward_slashes() {
        let prefix = import_prefix(
            Path::new("/project/a/b/helper"),
            Path::new("/project/x/store/modules"),
        );
        assert_eq!(prefix, "../../../x/store/modules");
        assert!(!prefix.contains('\\'));
    }

    #[test]
    fn test_relative_path_down_only() {
        let rel = relative_path(Path::new("/a"), Path::new("/a/b/c"));
        assert_eq!(rel, PathBuf::from("b/c"));
    }

    #[test]
    fn test_default_settings_resolution() {
        let paths = ResolvedPaths::from_settings(&settings(RawConfig::default()));
        assert_eq!(paths.store_dir, PathBuf::from("/project/src/store"));
        assert_eq!(
            paths.output_file,
            PathBuf::from("/project/src/helper/use-store.ts")
        );
        assert_eq!(paths.output_dir, PathBuf::from("/project/src/helper"));
        assert_eq!(paths.import_prefix, "../store");
    }
}
