//! Property-based tests for search and canonicalization behavior.

use proptest::prelude::*;
use std::path::Component;

use crate::qualify::qualify;
use crate::search::PathSearcher;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

fn dotted_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(".".to_string()),
            Just("..".to_string()),
            path_component_strategy(),
        ],
        1..8,
    )
    .prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    // Qualification is idempotent: qualify(qualify(p)) == qualify(p)
    #[test]
    fn qualify_idempotent(path in absolute_path_strategy()) {
        if let Ok(Some(once)) = qualify(&path) {
            let once_str = once.to_str().unwrap().to_string();
            prop_assert_eq!(qualify(&once_str).unwrap(), Some(once));
        }
    }

    // Qualified paths are absolute and free of . and .. components
    #[test]
    fn qualify_output_is_canonical(path in dotted_path_strategy()) {
        if let Ok(Some(resolved)) = qualify(&path) {
            prop_assert!(resolved.is_absolute());
            for component in resolved.components() {
                prop_assert_ne!(component, Component::CurDir);
                prop_assert_ne!(component, Component::ParentDir);
            }
        }
    }

    // A command containing a separator bypasses the search entirely, so
    // find_path and qualify agree exactly whatever the search path says
    #[test]
    fn separator_bypasses_search(path in absolute_path_strategy()) {
        let searcher = PathSearcher::with_search_path("/no/such/dir:/also/missing");
        let via_search = searcher.find_path(&path).ok();
        let via_qualify = qualify(&path).ok();
        prop_assert_eq!(via_search, via_qualify);
    }
}
