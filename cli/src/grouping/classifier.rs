//! # File Classifier
//!
//! File: cli/src/grouping/classifier.rs
//!
//! ## Overview
//!
//! Maps a bare filename to the bucket it is grouped under. Buckets are checked
//! in a fixed priority order and the first matching rule wins, so a file named
//! `sugar.cmake` is a `Sugar` file even though `.cmake` is also a regular
//! source extension.
//!
//! | Bucket        | Rule                                          | Label tag |
//! |---------------|-----------------------------------------------|-----------|
//! | `Sugar`       | `sugar.cmake`                                 | `[sugar]` |
//! | `Template`    | `*.tpp`                                       | `[tmpl]`  |
//! | `ForwardDecl` | `*.fpp`                                       | `[fwd]`   |
//! | `BuildMeta`   | `CMakeLists.txt`, `xcode.environment`         | `[cmake]` |
//! | `Regular`     | headers, sources, inline and `.cmake` files   | none      |
//! | `Any`         | everything else (disabled by skip-non-source) | none      |
//!
use serde::Serialize;
use std::fmt;

/// Fixed filename of the generated sugar include manifest.
pub const SUGAR_FILENAME: &str = "sugar.cmake";
/// Extension of template instantiation files.
pub const TEMPLATE_EXTENSION: &str = ".tpp";
/// Extension of forward-declaration headers.
pub const FORWARD_DECL_EXTENSION: &str = ".fpp";
/// Project/build descriptor filenames.
pub const BUILD_META_FILENAMES: &[&str] = &["CMakeLists.txt", "xcode.environment"];
/// Source, header, inline and build-include extensions.
pub const REGULAR_EXTENSIONS: &[&str] = &[
    ".rh", // Windows MSVC resource header
    ".h", ".hpp", ".ipp", ".cpp", ".cc", ".cxx", ".cmake", ".inl",
];

/// Semantic classification of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Sugar,
    Template,
    ForwardDecl,
    BuildMeta,
    Regular,
    Any,
}

impl Bucket {
    /// All buckets in evaluation order.
    pub const ALL: [Bucket; 6] = [
        Bucket::Sugar,
        Bucket::Template,
        Bucket::ForwardDecl,
        Bucket::BuildMeta,
        Bucket::Regular,
        Bucket::Any,
    ];

    /// Suffix appended to a group label, `None` for the plain source group.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Bucket::Sugar => Some("[sugar]"),
            Bucket::Template => Some("[tmpl]"),
            Bucket::ForwardDecl => Some("[fwd]"),
            Bucket::BuildMeta => Some("[cmake]"),
            Bucket::Regular | Bucket::Any => None,
        }
    }

    /// Index of the output slot this bucket is collected into. Slots are
    /// emitted in index order, which differs from evaluation order.
    ///
    /// `Regular` and `Any` share the untagged slot.
    pub(crate) fn slot(self) -> usize {
        match self {
            Bucket::Template => 0,
            Bucket::ForwardDecl => 1,
            Bucket::Sugar => 2,
            Bucket::BuildMeta => 3,
            Bucket::Regular | Bucket::Any => 4,
        }
    }

    /// Whether `filename` satisfies this bucket's own rule, ignoring priority.
    pub fn matches(self, filename: &str) -> bool {
        match self {
            Bucket::Sugar => filename == SUGAR_FILENAME,
            Bucket::Template => filename.ends_with(TEMPLATE_EXTENSION),
            Bucket::ForwardDecl => filename.ends_with(FORWARD_DECL_EXTENSION),
            Bucket::BuildMeta => BUILD_META_FILENAMES.contains(&filename),
            Bucket::Regular => REGULAR_EXTENSIONS
                .iter()
                .any(|extension| filename.ends_with(extension)),
            Bucket::Any => true,
        }
    }
}

/// Number of distinct output slots (see [`Bucket::slot`]).
pub(crate) const SLOT_COUNT: usize = 5;

/// Label tags per slot, in emission order.
pub(crate) const SLOT_TAGS: [Option<&str>; SLOT_COUNT] = [
    Bucket::Template.tag(),
    Bucket::ForwardDecl.tag(),
    Bucket::Sugar.tag(),
    Bucket::BuildMeta.tag(),
    None,
];

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Sugar => "sugar",
            Bucket::Template => "template",
            Bucket::ForwardDecl => "forward-decl",
            Bucket::BuildMeta => "build-meta",
            Bucket::Regular => "regular",
            Bucket::Any => "any",
        };
        f.write_str(name)
    }
}

/// Classifies bare filenames, optionally dropping unknown ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    skip_non_source: bool,
}

impl Classifier {
    pub fn new(skip_non_source: bool) -> Self {
        Self { skip_non_source }
    }

    pub fn skip_non_source(&self) -> bool {
        self.skip_non_source
    }

    /// Returns the first bucket whose rule matches, or `None` when the file
    /// matches nothing and skip-non-source is active.
    pub fn classify(&self, filename: &str) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .filter(|bucket| !(self.skip_non_source && *bucket == Bucket::Any))
            .find(|bucket| bucket.matches(filename))
    }
}
