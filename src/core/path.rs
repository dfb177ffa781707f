//! Dot-delimited key paths
//!
//! A path string such as `books.formats.nature` addresses every value reached
//! by following those keys, whatever lists sit in between. List indices are
//! never part of a path and a key containing a literal `.` cannot be
//! addressed.

use std::fmt;

/// Segment separator for path strings
pub const SEPARATOR: char = '.';

/// A parsed key path for accessing nested values
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Create a new empty key path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key path from multiple segments
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Split a path string on `.`
    ///
    /// An empty string yields an empty path. Empty segments after the last
    /// non-empty one are dropped; all others are kept and will simply never
    /// match a key, so `"."` is not the empty path.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Self::new();
        }

        let mut segments: Vec<String> = input.split(SEPARATOR).map(str::to_string).collect();
        if let Some(last) = segments.iter().rposition(|s| !s.is_empty()) {
            segments.truncate(last + 1);
        }
        Self { segments }
    }

    /// Get the segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Get a subpath from the given index
    pub fn subpath(&self, from: usize) -> Self {
        Self::from_segments(self.segments.get(from..).unwrap_or(&[]).to_vec())
    }

    /// Append a segment to this path
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Create a new path by appending a segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Join the segments back with `.`
    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dotted())
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self::from_segments(segments)
    }
}

/// Whether the dotted `candidate` lies on the way to, or is, the dotted `scope`.
///
/// An unset scope admits everything. Otherwise the two must be equal or one
/// must be a dotted prefix of the other; `book` is not in scope of
/// `books.title`.
pub fn in_scope(candidate: &str, scope: Option<&str>) -> bool {
    match scope {
        None => true,
        Some(scope) => {
            candidate == scope
                || is_dotted_prefix(candidate, scope)
                || is_dotted_prefix(scope, candidate)
        }
    }
}

fn is_dotted_prefix(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_dot_notation() {
        let path = KeyPath::parse("books.formats.nature");
        assert_eq!(path.segments(), &["books", "formats", "nature"]);
        assert_eq!(path.to_dotted(), "books.formats.nature");
        assert_eq!(path.first(), Some("books"));
        assert_eq!(path.last(), Some("nature"));
    }

    #[test]
    fn test_empty_path() {
        let path = KeyPath::parse("");
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        assert_eq!(KeyPath::parse("books.").segments(), &["books"]);
        assert_eq!(KeyPath::parse("a..b").segments(), &["a", "", "b"]);
        assert_eq!(KeyPath::parse(".").segments(), &["", ""]);
        assert_eq!(KeyPath::parse("..a.").segments(), &["", "", "a"]);
        assert!(!KeyPath::parse(".").is_empty());
    }

    #[test]
    fn test_path_operations() {
        let path = KeyPath::parse("a.b");
        assert_eq!(path.child("c").to_dotted(), "a.b.c");
        assert_eq!(KeyPath::parse("a.b.c.d").subpath(1).to_dotted(), "b.c.d");
        assert_eq!(path.to_string(), "a.b");
    }

    #[test]
    fn test_in_scope() {
        assert!(in_scope("anything", None));
        assert!(in_scope("books", Some("books.title")));
        assert!(in_scope("books.title", Some("books.title")));
        assert!(in_scope("books.title.main", Some("books.title")));
        assert!(!in_scope("books.formats", Some("books.title")));
        assert!(!in_scope("book", Some("books.title")));
        assert!(!in_scope("books.titles", Some("books.title")));
    }
}
