//! Rendering of the generated helper module
//!
//! Two render modes share the same data:
//! - combined (`ts`): one module carrying imports, the lookup-table type and
//!   the typed accessor function
//! - split (`js`): an untyped implementation module plus a declarations-only
//!   `.d.ts` companion
//!
//! Import ordering is part of the output contract: per-store imports appear
//! in enumeration order and the shared-instance import is always the last
//! relative import. The declaration artifact carries no executable logic and
//! therefore no shared-instance import.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::config::OutputKind;
use crate::paths::ResolvedPaths;
use crate::scan::StoreEntry;

/// Module providing the reactive-reference wrapper
const REACTIVITY_MODULE: &str = "vue";

/// Binding name for the shared instance exported by the store index module
const SHARED_INSTANCE_BINDING: &str = "store";

/// Banner emitted at the top of every artifact
const GENERATED_BANNER: &str = "// Generated by storegen. Do not edit by hand.";

/// One rendered output file, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Builder for ES import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Bind the module's default export.
    pub fn default_export(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Bind a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Render the import statement.
    pub fn build(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };

        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => format!("import {}{} from \"{}\";", type_kw, def, self.from),
            (Some(def), false) => format!(
                "import {}{}, {{ {} }} from \"{}\";",
                type_kw,
                def,
                self.named.join(", "),
                self.from
            ),
            (None, false) => format!(
                "import {}{{ {} }} from \"{}\";",
                type_kw,
                self.named.join(", "),
                self.from
            ),
            (None, true) => format!("import \"{}\";", self.from),
        }
    }
}

/// Render all artifacts for a run.
///
/// Every enumerated identifier appears exactly once in every artifact; the
/// two split-mode artifacts are rendered from the same entry slice so they
/// cannot drift apart.
pub fn render(entries: &[StoreEntry], paths: &ResolvedPaths, kind: OutputKind) -> Vec<Artifact> {
    let prefix = paths.import_prefix.as_str();

    match kind {
        OutputKind::Ts => vec![Artifact::new(
            &paths.output_file,
            render_combined(entries, prefix),
        )],
        OutputKind::Js => {
            let declaration = paths
                .declaration_file
                .as_ref()
                .expect("split mode always resolves a declaration path");
            vec![
                Artifact::new(&paths.output_file, render_implementation(entries, prefix)),
                Artifact::new(declaration, render_declaration(entries, prefix)),
            ]
        }
    }
}

/// Combined `ts` module: imports, lookup-table type, typed accessor.
pub fn render_combined(entries: &[StoreEntry], prefix: &str) -> String {
    let mut out = String::new();

    writeln!(out, "{GENERATED_BANNER}").unwrap();
    writeln!(
        out,
        "{}",
        Import::new(REACTIVITY_MODULE)
            .named("toRef")
            .named("type ToRef")
            .build()
    )
    .unwrap();
    out.push('\n');
    write_store_imports(&mut out, entries, prefix, true);
    out.push('\n');
    write_store_map_type(&mut out, entries);
    out.push('\n');
    out.push_str(STORE_REFS_TYPE);
    out.push('\n');
    out.push_str("export function useStore<Name extends keyof StoreMap>(\n");
    out.push_str("  name: Name,\n");
    out.push_str("): StoreRefs<ReturnType<StoreMap[Name]>> {\n");
    write_dispatch_table(&mut out, entries);
    out.push_str("  const instance = stores[name](store);\n");
    out.push_str("  const refs: Record<string, unknown> = {};\n");
    out.push_str("  for (const key of Object.keys(instance)) {\n");
    out.push_str("    const member = (instance as Record<string, unknown>)[key];\n");
    out.push_str("    if (typeof member !== \"function\") {\n");
    out.push_str("      refs[key] = toRef(instance, key as keyof typeof instance);\n");
    out.push_str("    }\n");
    out.push_str("  }\n");
    out.push_str("  return { ...instance, ...refs } as StoreRefs<ReturnType<StoreMap[Name]>>;\n");
    out.push_str("}\n");

    out
}

/// Split-mode implementation module: same accessor logic, no annotations.
pub fn render_implementation(entries: &[StoreEntry], prefix: &str) -> String {
    let mut out = String::new();

    writeln!(out, "{GENERATED_BANNER}").unwrap();
    writeln!(
        out,
        "{}",
        Import::new(REACTIVITY_MODULE).named("toRef").build()
    )
    .unwrap();
    out.push('\n');
    write_store_imports(&mut out, entries, prefix, true);
    out.push('\n');
    out.push_str("export function useStore(name) {\n");
    write_dispatch_table(&mut out, entries);
    out.push_str("  const instance = stores[name](store);\n");
    out.push_str("  const refs = {};\n");
    out.push_str("  for (const key of Object.keys(instance)) {\n");
    out.push_str("    if (typeof instance[key] !== \"function\") {\n");
    out.push_str("      refs[key] = toRef(instance, key);\n");
    out.push_str("    }\n");
    out.push_str("  }\n");
    out.push_str("  return { ...instance, ...refs };\n");
    out.push_str("}\n");

    out
}

/// Declarations-only companion: type imports, lookup-table type, signature.
pub fn render_declaration(entries: &[StoreEntry], prefix: &str) -> String {
    let mut out = String::new();

    writeln!(out, "{GENERATED_BANNER}").unwrap();
    writeln!(
        out,
        "{}",
        Import::new(REACTIVITY_MODULE)
            .named("ToRef")
            .type_only()
            .build()
    )
    .unwrap();
    out.push('\n');
    write_store_imports(&mut out, entries, prefix, false);
    out.push('\n');
    write_store_map_type(&mut out, entries);
    out.push('\n');
    out.push_str(STORE_REFS_TYPE);
    out.push('\n');
    out.push_str("export declare function useStore<Name extends keyof StoreMap>(\n");
    out.push_str("  name: Name,\n");
    out.push_str("): StoreRefs<ReturnType<StoreMap[Name]>>;\n");

    out
}

/// Mapped type wrapping non-function members in reactive references.
const STORE_REFS_TYPE: &str = "type StoreRefs<S> = {\n  [K in keyof S]: S[K] extends (...args: never[]) => unknown ? S[K] : ToRef<S[K]>;\n};\n";

/// Per-store default imports in entry order, then (when `with_shared`) the
/// shared-instance import resolved via the bare prefix.
fn write_store_imports(out: &mut String, entries: &[StoreEntry], prefix: &str, with_shared: bool) {
    for entry in entries {
        let specifier = store_specifier(prefix, &entry.identifier);
        writeln!(
            out,
            "{}",
            Import::new(specifier)
                .default_export(store_binding(&entry.identifier))
                .build()
        )
        .unwrap();
    }
    if with_shared {
        writeln!(
            out,
            "{}",
            Import::new(prefix)
                .default_export(SHARED_INSTANCE_BINDING)
                .build()
        )
        .unwrap();
    }
}

fn write_store_map_type(out: &mut String, entries: &[StoreEntry]) {
    if entries.is_empty() {
        out.push_str("type StoreMap = {};\n");
        return;
    }
    out.push_str("type StoreMap = {\n");
    for entry in entries {
        writeln!(
            out,
            "  {}: typeof {};",
            entry.identifier,
            store_binding(&entry.identifier)
        )
        .unwrap();
    }
    out.push_str("};\n");
}

fn write_dispatch_table(out: &mut String, entries: &[StoreEntry]) {
    if entries.is_empty() {
        out.push_str("  const stores = {};\n");
        return;
    }
    out.push_str("  const stores = {\n");
    for entry in entries {
        writeln!(
            out,
            "    {}: {},",
            entry.identifier,
            store_binding(&entry.identifier)
        )
        .unwrap();
    }
    out.push_str("  };\n");
}

/// Import binding name for a store identifier (`user` -> `userStore`)
fn store_binding(identifier: &str) -> String {
    format!("{identifier}Store")
}

fn store_specifier(prefix: &str, identifier: &str) -> String {
    format!("{prefix}/{identifier}")
}
