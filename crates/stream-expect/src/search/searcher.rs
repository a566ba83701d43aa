//! The searcher capability and literal searchers.
//!
//! A searcher is a reusable, stateless matching strategy fixed to one
//! content domain. Searching never mutates the haystack; handing a
//! searcher content from the other domain is an error, detected before any
//! matching work happens.

use std::borrow::Cow;

use memchr::memmem;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use crate::content::{Chunk, Content, Domain};
use crate::error::{ExpectError, Result};
use crate::search::matches::{Match, SequenceMatch};

/// A reusable pattern-matching strategy over one content domain.
///
/// Implementations are stateless with respect to `search` calls and may be
/// invoked any number of times. The trait is object-safe so heterogeneous
/// strategies can share a
/// [`SearcherCollection`](crate::search::SearcherCollection).
pub trait Searcher {
    /// The content domain this searcher accepts.
    fn domain(&self) -> Domain;

    /// Search `content` for the first match.
    ///
    /// Returns `Ok(None)` when the pattern is absent, and an error when
    /// `content` belongs to the other domain.
    fn search(&self, content: Content<'_>) -> Result<Option<Match>>;
}

/// Literal substring search over text, aware of Unicode canonical
/// equivalence.
///
/// The pattern is NFC-normalized at construction and the haystack is
/// NFC-normalized before searching (zero-copy when already normalized), so
/// a composed accented code point and its decomposed base-plus-combining
/// form match each other in both directions. Reported offsets are byte
/// offsets into the NFC form of the haystack.
#[derive(Debug, Clone)]
pub struct TextSearcher {
    pattern: String,
}

impl TextSearcher {
    /// Create a searcher for the literal `pattern`.
    #[must_use]
    pub fn new(pattern: impl AsRef<str>) -> Self {
        Self {
            pattern: pattern.as_ref().nfc().collect(),
        }
    }

    /// The NFC-normalized pattern this searcher looks for.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Searcher for TextSearcher {
    fn domain(&self) -> Domain {
        Domain::Text
    }

    fn search(&self, content: Content<'_>) -> Result<Option<Match>> {
        let Some(text) = content.as_text() else {
            return Err(ExpectError::domain_mismatch(
                "text search",
                Domain::Text,
                content.domain(),
            ));
        };

        let haystack: Cow<'_, str> = match is_nfc_quick(text.chars()) {
            IsNormalized::Yes => Cow::Borrowed(text),
            IsNormalized::No | IsNormalized::Maybe => Cow::Owned(text.nfc().collect()),
        };

        Ok(haystack.find(&self.pattern).map(|start| {
            Match::Sequence(SequenceMatch::new(
                start,
                start + self.pattern.len(),
                Chunk::Text(self.pattern.clone()),
            ))
        }))
    }
}

/// Literal subsequence search over bytes.
///
/// The needle is handed to a precompiled [`memmem::Finder`] so repeated
/// searches over large buffers use the SIMD fast paths.
#[derive(Debug, Clone)]
pub struct BytesSearcher {
    finder: memmem::Finder<'static>,
}

impl BytesSearcher {
    /// Create a searcher for the literal byte `pattern`.
    #[must_use]
    pub fn new(pattern: impl AsRef<[u8]>) -> Self {
        Self {
            finder: memmem::Finder::new(pattern.as_ref()).into_owned(),
        }
    }

    /// The byte pattern this searcher looks for.
    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        self.finder.needle()
    }
}

impl Searcher for BytesSearcher {
    fn domain(&self) -> Domain {
        Domain::Binary
    }

    fn search(&self, content: Content<'_>) -> Result<Option<Match>> {
        let Some(haystack) = content.as_binary() else {
            return Err(ExpectError::domain_mismatch(
                "bytes search",
                Domain::Binary,
                content.domain(),
            ));
        };

        Ok(self.finder.find(haystack).map(|start| {
            Match::Sequence(SequenceMatch::new(
                start,
                start + self.pattern().len(),
                Chunk::Binary(self.pattern().to_vec()),
            ))
        }))
    }
}
