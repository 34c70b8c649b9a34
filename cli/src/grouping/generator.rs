//! # Group Generator
//!
//! File: cli/src/grouping/generator.rs
//!
//! ## Overview
//!
//! The `Generator` holds two trees:
//!
//! 1. `top`: pinned to the project's top directory, never split above it.
//! 2. `third_party`: a virtual root with an empty path that collects every
//!    path outside `top` as its own branches.
//!
//! Each added path goes to `top` when it lives under the top directory and to
//! `third_party` otherwise. `results` yields the top groups first, then the
//! third-party groups.
//!
use super::tree::{reject_line_terminator, GroupResults, PathTree};
use super::GroupResult;
use crate::core::error::GroupingResult;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Generator {
    top: PathTree,
    third_party: PathTree,
    verbose: bool,
}

impl Generator {
    /// Creates a generator for the given top directory. Trailing slashes on
    /// `top` are ignored.
    pub fn new(top: &str, verbose: bool) -> Self {
        let top = top.trim_end_matches('/');
        if verbose {
            debug!("init with top: {}", top);
        }
        Self {
            top: PathTree::rooted(top, verbose),
            third_party: PathTree::virtual_root(verbose),
            verbose,
        }
    }

    pub fn add(&mut self, source: &str) -> GroupingResult<()> {
        reject_line_terminator(source)?;
        if self.verbose {
            debug!("add: {}", source);
        }
        if self.top.accepts(source)? {
            self.top.add(source)
        } else {
            self.third_party.add(source)
        }
    }

    /// Adds every path of `sources`, stopping at the first failure.
    pub fn extend<I, S>(&mut self, sources: I) -> GroupingResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sources
            .into_iter()
            .try_for_each(|source| self.add(source.as_ref()))
    }

    pub fn top(&self) -> &PathTree {
        &self.top
    }

    pub fn third_party(&self) -> &PathTree {
        &self.third_party
    }

    /// Number of distinct files held by both trees.
    pub fn file_count(&self) -> usize {
        self.top.file_count() + self.third_party.file_count()
    }

    /// Lazily yields the top groups followed by the third-party groups.
    pub fn results<'a>(
        &'a self,
        top_name: &str,
        third_party_name: &str,
        skip_non_source: bool,
    ) -> std::iter::Chain<GroupResults<'a>, GroupResults<'a>> {
        self.top
            .results(top_name, skip_non_source)
            .chain(self.third_party.results(third_party_name, skip_non_source))
    }

    /// Collects the groups and the flat, de-duplicated source list in
    /// output order.
    pub fn collect(
        &self,
        top_name: &str,
        third_party_name: &str,
        skip_non_source: bool,
    ) -> (Vec<GroupResult>, Vec<String>) {
        let groups: Vec<GroupResult> = self
            .results(top_name, third_party_name, skip_non_source)
            .collect();
        let sources = groups
            .iter()
            .flat_map(|group| group.files.iter().cloned())
            .collect();
        (groups, sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GroupsError;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn generate(top: &str, paths: &[&str], skip: bool) -> Vec<GroupResult> {
        let mut generator = Generator::new(top, false);
        generator.extend(paths).unwrap();
        generator.results("[top]", "[third party]", skip).collect()
    }

    #[test]
    fn test_scenario_sibling_directories() {
        let results = generate(
            "/top",
            &["/top/a/b/x.cpp", "/top/a/c/y.cpp", "/top/a/b/z.hpp"],
            false,
        );
        assert_eq!(
            results,
            vec![
                GroupResult {
                    name: "[top]\\a\\b".into(),
                    files: vec!["/top/a/b/x.cpp".into(), "/top/a/b/z.hpp".into()],
                },
                GroupResult {
                    name: "[top]\\a\\c".into(),
                    files: vec!["/top/a/c/y.cpp".into()],
                },
            ]
        );
    }

    #[test]
    fn test_scenario_sugar_file() {
        let results = generate("/top", &["/top/sugar.cmake"], false);
        assert_eq!(
            results,
            vec![GroupResult {
                name: "[top]\\[sugar]".into(),
                files: vec!["/top/sugar.cmake".into()],
            }]
        );
    }

    #[test]
    fn test_scenario_third_party_only() {
        let results = generate("/top", &["/ext/lib1/a.hpp", "/ext/lib2/b.hpp"], false);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["[third party]\\/ext\\lib1", "[third party]\\/ext\\lib2"]
        );
        assert_eq!(results[0].files, vec!["/ext/lib1/a.hpp"]);
        assert_eq!(results[1].files, vec!["/ext/lib2/b.hpp"]);
    }

    #[test]
    fn test_scenario_skip_non_source() {
        assert!(generate("/top", &["/top/readme.txt"], true).is_empty());
    }

    #[test]
    fn test_top_results_come_before_third_party() {
        let results = generate("/top/", &["/ext/z/a.h", "/top/src/b.cpp"], false);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["[top]\\src", "[third party]\\/ext/z"]);
    }

    #[test]
    fn test_prefix_lookalike_is_third_party() {
        let results = generate("/top", &["/topper/a.cpp"], false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "[third party]\\/topper");
    }

    #[test]
    fn test_add_rejects_line_terminator() {
        let mut generator = Generator::new("/top", false);
        assert!(matches!(
            generator.add("/top/a.cpp\n"),
            Err(GroupsError::InvalidInput { .. })
        ));
        assert_eq!(generator.file_count(), 0);
    }

    #[test]
    fn test_verbose_does_not_change_results() {
        let paths = ["/top/a/b/x.cpp", "/top/a/c/y.cpp", "/ext/q/r.h"];
        let mut quiet = Generator::new("/top", false);
        let mut loud = Generator::new("/top", true);
        quiet.extend(paths).unwrap();
        loud.extend(paths).unwrap();
        assert_eq!(
            quiet.collect("T", "P", false),
            loud.collect("T", "P", false)
        );
    }

    #[test]
    fn test_collect_flattens_sources_in_group_order() {
        let mut generator = Generator::new("/top", false);
        generator
            .extend(["/top/b/y.cpp", "/top/a/x.cpp", "/top/a/x.cpp"])
            .unwrap();
        let (groups, sources) = generator.collect("T", "P", false);
        assert_eq!(groups.len(), 2);
        assert_eq!(sources, vec!["/top/a/x.cpp", "/top/b/y.cpp"]);
    }

    // ── Properties ──────────────────────────────────────────────────────

    fn arb_segment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("a".to_string()),
            Just("ab".to_string()),
            Just("b".to_string()),
            Just("lib".to_string()),
            Just("lib1".to_string()),
            Just("src".to_string()),
        ]
    }

    fn arb_filename() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("main.cpp".to_string()),
            Just("util.hpp".to_string()),
            Just("vec.tpp".to_string()),
            Just("vec.fpp".to_string()),
            Just("sugar.cmake".to_string()),
            Just("CMakeLists.txt".to_string()),
            Just("readme.txt".to_string()),
        ]
    }

    fn arb_path() -> impl Strategy<Value = String> {
        (
            prop_oneof![Just("/top"), Just("/ext"), Just("/opt/x")],
            prop::collection::vec(arb_segment(), 0..4),
            arb_filename(),
        )
            .prop_map(|(root, dirs, file)| {
                let mut path = root.to_string();
                for dir in dirs {
                    path.push('/');
                    path.push_str(&dir);
                }
                path.push('/');
                path.push_str(&file);
                path
            })
    }

    fn arb_paths() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_path(), 1..24)
    }

    fn first_segment(path: &str) -> &str {
        let trimmed = path.trim_start_matches('/');
        let end = trimmed.find('/').unwrap_or(trimmed.len());
        &trimmed[..end]
    }

    fn assert_siblings_disjoint(tree: &PathTree) -> Result<(), TestCaseError> {
        let mut pending = vec![tree.root()];
        while let Some(id) = pending.pop() {
            let children = tree.sorted_children(id);
            let mut seen = BTreeSet::new();
            for child in &children {
                let segment = first_segment(tree.node(*child).path());
                prop_assert!(
                    seen.insert(segment.to_string()),
                    "siblings share leading segment '{}' under '{}'",
                    segment,
                    tree.node(id).path()
                );
            }
            pending.extend(children);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn every_path_is_emitted_exactly_once(paths in arb_paths()) {
            let mut generator = Generator::new("/top", false);
            generator.extend(&paths).unwrap();

            let mut emitted: BTreeMap<String, usize> = BTreeMap::new();
            for group in generator.results("T", "P", false) {
                prop_assert!(!group.files.is_empty());
                for file in group.files {
                    *emitted.entry(file).or_default() += 1;
                }
            }

            let expected: BTreeSet<String> = paths.iter().cloned().collect();
            prop_assert_eq!(emitted.keys().cloned().collect::<BTreeSet<_>>(), expected);
            prop_assert!(emitted.values().all(|count| *count == 1));
        }

        #[test]
        fn skip_mode_emits_exactly_the_source_files(paths in arb_paths()) {
            let mut generator = Generator::new("/top", false);
            generator.extend(&paths).unwrap();

            let emitted: BTreeSet<String> = generator
                .results("T", "P", true)
                .flat_map(|group| group.files)
                .collect();
            let expected: BTreeSet<String> = paths
                .iter()
                .filter(|path| !path.ends_with("readme.txt"))
                .cloned()
                .collect();
            prop_assert_eq!(emitted, expected);
        }

        #[test]
        fn output_is_independent_of_insertion_order(paths in arb_paths()) {
            let mut forward = Generator::new("/top", false);
            forward.extend(&paths).unwrap();
            let mut backward = Generator::new("/top", false);
            backward.extend(paths.iter().rev()).unwrap();

            prop_assert_eq!(
                forward.collect("T", "P", false),
                backward.collect("T", "P", false)
            );
        }

        #[test]
        fn siblings_never_share_a_leading_directory(paths in arb_paths()) {
            let mut generator = Generator::new("/top", false);
            generator.extend(&paths).unwrap();
            assert_siblings_disjoint(generator.top())?;
            assert_siblings_disjoint(generator.third_party())?;
        }

        #[test]
        fn adding_twice_changes_nothing(paths in arb_paths()) {
            let mut once = Generator::new("/top", false);
            once.extend(&paths).unwrap();
            let mut twice = Generator::new("/top", false);
            twice.extend(paths.iter().chain(paths.iter())).unwrap();
            prop_assert_eq!(once.collect("T", "P", false), twice.collect("T", "P", false));
        }
    }
}
