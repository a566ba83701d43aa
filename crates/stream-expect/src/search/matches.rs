//! Match result records.
//!
//! Immutable descriptions of where and what a searcher matched. Offsets
//! are byte offsets into the searched content (for text, always on `char`
//! boundaries of the haystack the searcher actually examined).

use std::collections::HashMap;
use std::fmt;

use crate::content::Chunk;

/// A literal (sequence) match.
#[derive(Debug, Clone)]
pub struct SequenceMatch {
    start: usize,
    end: usize,
    matched: Chunk,
    searcher_index: usize,
}

impl SequenceMatch {
    /// Create a new sequence match.
    #[must_use]
    pub const fn new(start: usize, end: usize, matched: Chunk) -> Self {
        Self {
            start,
            end,
            matched,
            searcher_index: 0,
        }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The matched content.
    #[must_use]
    pub const fn matched(&self) -> &Chunk {
        &self.matched
    }
}

/// A regular-expression match, including capture groups.
#[derive(Clone)]
pub struct RegexMatch {
    start: usize,
    end: usize,
    matched: Chunk,
    searcher_index: usize,
    /// Capture groups by position; slot 0 is the whole match.
    groups: Vec<Option<Chunk>>,
    /// Named-group lookup table.
    names: HashMap<String, usize>,
}

impl RegexMatch {
    /// Create a new regex match.
    #[must_use]
    pub fn new(
        start: usize,
        end: usize,
        matched: Chunk,
        groups: Vec<Option<Chunk>>,
        names: HashMap<String, usize>,
    ) -> Self {
        Self {
            start,
            end,
            matched,
            searcher_index: 0,
            groups,
            names,
        }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The matched content.
    #[must_use]
    pub const fn matched(&self) -> &Chunk {
        &self.matched
    }

    /// Number of capture groups, including the implicit whole-match group 0.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up a capture group by position. Group 0 is the whole match.
    ///
    /// Returns `None` if the index is out of range or the group did not
    /// participate in the match.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&Chunk> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    /// Look up a capture group by name.
    #[must_use]
    pub fn named_group(&self, name: &str) -> Option<&Chunk> {
        self.names.get(name).and_then(|&idx| self.group(idx))
    }

    /// All capture groups by position, including group 0.
    #[must_use]
    pub fn groups(&self) -> &[Option<Chunk>] {
        &self.groups
    }
}

impl fmt::Debug for RegexMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexMatch")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("matched", &self.matched)
            .field("searcher_index", &self.searcher_index)
            .field("groups", &self.groups.len())
            .finish()
    }
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub enum Match {
    /// A literal match.
    Sequence(SequenceMatch),
    /// A regex match.
    Regex(RegexMatch),
}

impl Match {
    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Sequence(m) => m.start(),
            Self::Regex(m) => m.start(),
        }
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::Sequence(m) => m.end(),
            Self::Regex(m) => m.end(),
        }
    }

    /// Length of the match in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if the match is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    /// The matched content.
    #[must_use]
    pub const fn matched(&self) -> &Chunk {
        match self {
            Self::Sequence(m) => m.matched(),
            Self::Regex(m) => m.matched(),
        }
    }

    /// Index of the searcher that produced this match within a
    /// [`SearcherCollection`](crate::search::SearcherCollection).
    ///
    /// Matches from standalone searchers report 0.
    #[must_use]
    pub const fn searcher_index(&self) -> usize {
        match self {
            Self::Sequence(m) => m.searcher_index,
            Self::Regex(m) => m.searcher_index,
        }
    }

    /// Get the regex match details, if this match came from a regex.
    #[must_use]
    pub const fn as_regex(&self) -> Option<&RegexMatch> {
        match self {
            Self::Regex(m) => Some(m),
            Self::Sequence(_) => None,
        }
    }

    /// Tag this match with the index of the searcher that produced it.
    #[must_use]
    pub fn with_searcher_index(mut self, index: usize) -> Self {
        match &mut self {
            Self::Sequence(m) => m.searcher_index = index,
            Self::Regex(m) => m.searcher_index = index,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Chunk;

    #[test]
    fn sequence_match_accessors() {
        let m = Match::Sequence(SequenceMatch::new(11, 14, Chunk::from("one")));
        assert_eq!(m.start(), 11);
        assert_eq!(m.end(), 14);
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
        assert_eq!(m.matched().as_text(), Some("one"));
        assert_eq!(m.searcher_index(), 0);
    }

    #[test]
    fn regex_match_groups() {
        let mut names = HashMap::new();
        names.insert("word".to_string(), 1);
        let m = RegexMatch::new(
            0,
            5,
            Chunk::from("alpha"),
            vec![Some(Chunk::from("alpha")), Some(Chunk::from("alp")), None],
            names,
        );
        assert_eq!(m.group_count(), 3);
        assert_eq!(m.group(0).and_then(Chunk::as_text), Some("alpha"));
        assert_eq!(m.group(1).and_then(Chunk::as_text), Some("alp"));
        assert!(m.group(2).is_none());
        assert!(m.group(7).is_none());
        assert_eq!(m.named_group("word").and_then(Chunk::as_text), Some("alp"));
        assert!(m.named_group("missing").is_none());
    }

    #[test]
    fn searcher_index_tagging() {
        let m = Match::Sequence(SequenceMatch::new(0, 2, Chunk::from("pi")));
        assert_eq!(m.with_searcher_index(3).searcher_index(), 3);
    }
}
