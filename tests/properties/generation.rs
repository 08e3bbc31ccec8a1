//! Property tests for generation runs on randomized store directories.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use storegen::config::{BuildMode, RawConfig, Settings};
use storegen::Generator;

/// Identifier-shaped store names so the generated bindings stay valid.
fn store_names() -> impl Strategy<Value = Vec<String>> {
    let name = proptest::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap();
    proptest::collection::hash_set(name, 0..8)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

fn seed(root: &Path, names: &[String]) {
    let store = root.join("src/store");
    fs::create_dir_all(&store).unwrap();
    for name in names {
        fs::write(
            store.join(format!("{name}.ts")),
            "export default (store) => ({});\n",
        )
        .unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: two consecutive runs with no filesystem changes in between
    /// produce byte-identical output.
    #[test]
    fn property_generation_is_idempotent(names in store_names()) {
        let dir = tempdir().unwrap();
        seed(dir.path(), &names);

        let settings = Settings::finalize(
            RawConfig::default(),
            dir.path().to_path_buf(),
            BuildMode::Production,
        );
        let generator = Generator::new(settings).unwrap();

        generator.run().unwrap();
        let first = fs::read_to_string(dir.path().join("src/helper/use-store.ts")).unwrap();
        generator.run().unwrap();
        let second = fs::read_to_string(dir.path().join("src/helper/use-store.ts")).unwrap();

        prop_assert_eq!(first, second);
    }

    /// PROPERTY: in split mode, the implementation and declaration artifacts
    /// reference exactly the same store bindings.
    #[test]
    fn property_split_artifacts_agree(names in store_names()) {
        let dir = tempdir().unwrap();
        seed(dir.path(), &names);

        let raw = RawConfig {
            output: Some("src/helper/use-store.js".into()),
            ..Default::default()
        };
        let settings = Settings::finalize(
            raw,
            dir.path().to_path_buf(),
            BuildMode::Production,
        );
        let summary = Generator::new(settings).unwrap().run().unwrap();

        let implementation =
            fs::read_to_string(dir.path().join("src/helper/use-store.js")).unwrap();
        let declaration =
            fs::read_to_string(dir.path().join("src/helper/use-store.d.ts")).unwrap();

        let expected: HashSet<String> = names.iter().cloned().collect();
        let summarized: HashSet<String> = summary.identifiers.iter().cloned().collect();
        prop_assert_eq!(&summarized, &expected);

        for name in &names {
            let binding = format!("{name}Store");
            prop_assert!(implementation.contains(&binding));
            prop_assert!(declaration.contains(&binding));
        }
    }

    /// PROPERTY: every enumerated identifier appears exactly once in the
    /// combined module's import list.
    #[test]
    fn property_each_store_imported_once(names in store_names()) {
        let dir = tempdir().unwrap();
        seed(dir.path(), &names);

        let settings = Settings::finalize(
            RawConfig::default(),
            dir.path().to_path_buf(),
            BuildMode::Production,
        );
        Generator::new(settings).unwrap().run().unwrap();

        let output = fs::read_to_string(dir.path().join("src/helper/use-store.ts")).unwrap();
        for name in &names {
            let import = format!("import {name}Store from \"../store/{name}\";");
            prop_assert_eq!(output.matches(&import).count(), 1);
        }
    }
}
