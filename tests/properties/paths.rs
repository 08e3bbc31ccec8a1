//! Property tests for relative-import computation.

use std::path::PathBuf;

use proptest::prelude::*;

use storegen::paths::{import_prefix, relative_path};

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[a-z0-9_-]{1,12}").unwrap();
    proptest::collection::vec(segment, 0..5)
}

fn absolute(segments: &[String]) -> PathBuf {
    let mut path = PathBuf::from("/project");
    for segment in segments {
        path.push(segment);
    }
    path
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the emitted prefix is always a usable module specifier —
    /// it starts with a dot segment and contains no backslashes.
    #[test]
    fn property_prefix_always_dot_anchored(from in segments(), to in segments()) {
        let prefix = import_prefix(&absolute(&from), &absolute(&to));

        prop_assert!(
            prefix == "."
                || prefix == ".."
                || prefix.starts_with("./")
                || prefix.starts_with("../"),
            "unexpected prefix {prefix}"
        );
        prop_assert!(!prefix.contains('\\'));
    }

    /// PROPERTY: joining the relative path back onto `from` and normalizing
    /// lexically lands on `to`.
    #[test]
    fn property_relative_path_rejoins(from in segments(), to in segments()) {
        let from = absolute(&from);
        let to = absolute(&to);

        let rel = relative_path(&from, &to);

        let mut rejoined = from.clone();
        for component in rel.components() {
            match component {
                std::path::Component::ParentDir => {
                    rejoined.pop();
                }
                std::path::Component::Normal(seg) => rejoined.push(seg),
                _ => {}
            }
        }
        prop_assert_eq!(rejoined, to);
    }
}
