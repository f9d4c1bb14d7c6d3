// Path ordering for route tables
//
// Sibling route files must come out in the same order on every machine so the
// router tries them in the order its matching expects, and so generated
// declaration files stay byte-stable. The order is a strict total order over
// NFC-normalized paths.

mod collation;

#[cfg(test)]
mod tests;

use collation::CollationKey;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Comparison key for one path segment.
///
/// Field order is the comparison order: index segments first, then leaf files,
/// then collation, then the raw normalized text as the final tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentKey {
    non_index: bool,
    non_leaf: bool,
    collation: CollationKey,
    text: String,
}

impl SegmentKey {
    pub fn is_index(&self) -> bool {
        !self.non_index
    }

    /// Final segment that names a file (has an extension)
    pub fn is_leaf(&self) -> bool {
        !self.non_leaf
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Precomputed sort key of a whole path.
///
/// `Vec` ordering gives "shorter path first" when one path is a prefix of the other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathKey {
    segments: Vec<SegmentKey>,
}

impl PathKey {
    pub fn segments(&self) -> &[SegmentKey] {
        &self.segments
    }
}

/// Path comparator parameterized by the index-file name
#[derive(Debug, Clone)]
pub struct PathOrdering {
    index_name: String,
}

impl Default for PathOrdering {
    fn default() -> Self {
        Self::new("index")
    }
}

impl PathOrdering {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
        }
    }

    pub fn key(&self, path: &str) -> PathKey {
        let normalized: String = path.nfc().collect();
        let trimmed = normalized.trim_start_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();
        let last = parts.len() - 1;

        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let stem = part.split('.').next().unwrap_or(part);
                SegmentKey {
                    non_index: stem != self.index_name,
                    non_leaf: !(i == last && part.contains('.')),
                    collation: CollationKey::new(part),
                    text: (*part).to_string(),
                }
            })
            .collect();

        PathKey { segments }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// In-place sort; keys are computed once per element.
    ///
    /// Paths that compare `Equal` but differ in raw text (`""` and `"/"`, or two
    /// Unicode forms of one name) are ordered by their raw text, so the result
    /// does not depend on the input order.
    pub fn sort<S: AsRef<str>>(&self, paths: &mut [S]) {
        paths.sort_by_cached_key(|p| (self.key(p.as_ref()), p.as_ref().to_owned()));
    }

    pub fn sorted<I, S>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = paths.into_iter().map(Into::into).collect();
        self.sort(&mut out);
        out
    }
}

/// Compare two paths with the default `index` file name.
///
/// Usable directly as a `sort_by` comparator.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    PathOrdering::default().compare(a, b)
}

pub fn sort_paths<S: AsRef<str>>(paths: &mut [S]) {
    PathOrdering::default().sort(paths);
}

pub fn sorted_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PathOrdering::default().sorted(paths)
}
