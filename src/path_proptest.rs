//! Property-based tests for the lexical path utilities.
//!
//! The resolver depends on `normalize_path` and `relative_to` agreeing
//! with each other across arbitrary mixes of normal, `.` and `..`
//! segments; proptest drives them with generated paths to cover the
//! combinations the hand-written cases in `path.rs` don't reach.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{normalize_path, relative_to};
    use proptest::prelude::*;
    use std::path::{Component, PathBuf};

    /// An absolute path of 0..6 short lowercase segments.
    fn abs_path() -> impl Strategy<Value = PathBuf> {
        prop::collection::vec("[a-z]{1,8}", 0..6).prop_map(|segments| {
            let mut path = PathBuf::from("/");
            for segment in segments {
                path.push(segment);
            }
            path
        })
    }

    /// A messy relative path mixing normal, `.` and `..` segments.
    fn messy_path() -> impl Strategy<Value = PathBuf> {
        prop::collection::vec(
            prop_oneof![
                3 => "[a-z]{1,8}",
                1 => Just(".".to_string()),
                1 => Just("..".to_string()),
            ],
            1..8,
        )
        .prop_map(|segments| segments.iter().collect())
    }

    // ============================================================================
    // normalize_path property tests
    // ============================================================================

    proptest! {
        /// Property: normalizing an already-normalized path changes nothing
        #[test]
        fn normalize_is_idempotent(path in messy_path()) {
            let once = normalize_path(&path);
            let twice = normalize_path(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized paths never contain `.` segments
        #[test]
        fn normalize_removes_curdir_segments(path in messy_path()) {
            let normalized = normalize_path(&path);
            prop_assert!(
                !normalized.components().any(|c| c == Component::CurDir),
                "normalize left a '.' in {:?}",
                normalized
            );
        }

        /// Property: in a normalized path, every `..` precedes all normal
        /// segments (a `..` after a normal segment would be collapsible)
        #[test]
        fn normalize_moves_updirs_to_the_front(path in messy_path()) {
            let normalized = normalize_path(&path);
            let components: Vec<Component> = normalized.components().collect();
            let first_normal = components
                .iter()
                .position(|c| matches!(c, Component::Normal(_)))
                .unwrap_or(components.len());
            prop_assert!(
                components[first_normal..]
                    .iter()
                    .all(|c| !matches!(c, Component::ParentDir)),
                "normalize left a collapsible '..' in {:?}",
                normalized
            );
        }

        /// Property: normalizing an absolute path never escapes the root
        #[test]
        fn normalize_keeps_absolute_paths_absolute(path in abs_path()) {
            let normalized = normalize_path(&path);
            prop_assert!(normalized.is_absolute());
        }
    }

    // ============================================================================
    // relative_to property tests
    // ============================================================================

    proptest! {
        /// Property: joining base with relative_to(base, path) and
        /// normalizing recovers the original path
        #[test]
        fn relative_to_round_trips(base in abs_path(), path in abs_path()) {
            let relative = relative_to(&base, &path);
            prop_assert_eq!(normalize_path(&base.join(&relative)), path);
        }

        /// Property: every path is `.` relative to itself
        #[test]
        fn relative_to_self_is_dot(path in abs_path()) {
            prop_assert_eq!(relative_to(&path, &path), PathBuf::from("."));
        }

        /// Property: a descendant's relative path has no `..` segments
        #[test]
        fn relative_to_descendant_never_climbs(
            base in abs_path(),
            suffix in prop::collection::vec("[a-z]{1,8}", 1..4),
        ) {
            let mut path = base.clone();
            for segment in &suffix {
                path.push(segment);
            }

            let relative = relative_to(&base, &path);
            prop_assert!(
                !relative.components().any(|c| matches!(c, Component::ParentDir)),
                "descendant path {:?} climbed",
                relative
            );
        }

        /// Property: an ancestor's relative path is only `..` segments
        #[test]
        fn relative_to_ancestor_only_climbs(
            base in abs_path(),
            extra in prop::collection::vec("[a-z]{1,8}", 1..4),
        ) {
            let mut deep = base.clone();
            for segment in &extra {
                deep.push(segment);
            }

            let relative = relative_to(&deep, &base);
            prop_assert_eq!(relative.components().count(), extra.len());
            prop_assert!(
                relative
                    .components()
                    .all(|c| matches!(c, Component::ParentDir))
            );
        }
    }
}
