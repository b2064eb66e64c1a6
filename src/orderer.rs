//! Deterministic ordering of collected files.

use crate::collector::FileEntry;
use std::cmp::Ordering;
use tracing::debug;

/// How the bundle orders its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Full path, ascending.
    #[default]
    Name,
    /// Extension first, then full path.
    Type,
}

impl SortMode {
    /// Parses a sort token. Anything other than `type` means [`SortMode::Name`].
    ///
    /// ```
    /// use srcbundle::orderer::SortMode;
    ///
    /// assert_eq!(SortMode::from_token("type"), SortMode::Type);
    /// assert_eq!(SortMode::from_token("name"), SortMode::Name);
    /// assert_eq!(SortMode::from_token("size"), SortMode::Name);
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token {
            "type" => SortMode::Type,
            "name" => SortMode::Name,
            other => {
                debug!(token = other, "unrecognized sort mode, using name order");
                SortMode::Name
            }
        }
    }
}

/// Ordinal comparison of the full path strings.
fn compare_paths(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.path.to_string_lossy().cmp(&b.path.to_string_lossy())
}

/// Sorts `entries` in place according to `mode`.
pub fn order(entries: &mut [FileEntry], mode: SortMode) {
    match mode {
        SortMode::Name => entries.sort_by(compare_paths),
        SortMode::Type => entries.sort_by(|a, b| {
            a.extension
                .cmp(&b.extension)
                .then_with(|| compare_paths(a, b))
        }),
    }
}
