//! Ordered collections of searchers.

use std::fmt;

use crate::content::{Content, Domain};
use crate::error::{ExpectError, Result};
use crate::search::matches::Match;
use crate::search::searcher::Searcher;

/// An ordered, non-empty set of searchers sharing one domain.
///
/// A collection is itself a [`Searcher`], so it can be nested or passed
/// anywhere a single searcher is expected. Searching evaluates every
/// member and returns the match with the lowest start offset; exact ties
/// go to the member declared first. The winning match's
/// [`searcher_index`](Match::searcher_index) records which member produced
/// it.
pub struct SearcherCollection {
    searchers: Vec<Box<dyn Searcher>>,
    domain: Domain,
}

impl SearcherCollection {
    /// Create a collection from `searchers`.
    ///
    /// Fails if `searchers` is empty or its members span both domains.
    pub fn new(searchers: Vec<Box<dyn Searcher>>) -> Result<Self> {
        let Some(first) = searchers.first() else {
            return Err(ExpectError::EmptyCollection);
        };
        let domain = first.domain();
        for searcher in &searchers {
            if searcher.domain() != domain {
                return Err(ExpectError::domain_mismatch(
                    "searcher collection",
                    domain,
                    searcher.domain(),
                ));
            }
        }
        Ok(Self { searchers, domain })
    }

    /// Number of member searchers (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    /// Always false; collections cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }

    /// Iterate over the members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Searcher> {
        self.searchers.iter().map(Box::as_ref)
    }

    /// Get a member by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn Searcher> {
        self.searchers.get(index).map(Box::as_ref)
    }
}

impl Searcher for SearcherCollection {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn search(&self, content: Content<'_>) -> Result<Option<Match>> {
        if content.domain() != self.domain {
            return Err(ExpectError::domain_mismatch(
                "collection search",
                self.domain,
                content.domain(),
            ));
        }

        let mut best: Option<Match> = None;
        for (index, searcher) in self.searchers.iter().enumerate() {
            if let Some(m) = searcher.search(content)? {
                let better = best.as_ref().is_none_or(|b| m.start() < b.start());
                if better {
                    best = Some(m.with_searcher_index(index));
                }
            }
        }
        Ok(best)
    }
}

impl fmt::Debug for SearcherCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearcherCollection")
            .field("domain", &self.domain)
            .field("len", &self.searchers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::regex::RegexSearcher;
    use crate::search::searcher::{BytesSearcher, TextSearcher};

    #[test]
    fn constructor_captures_domain() {
        let uut = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("alpha")),
            Box::new(TextSearcher::new("beta")),
        ])
        .unwrap();
        assert_eq!(uut.domain(), Domain::Text);
        assert_eq!(uut.len(), 2);
        assert!(!uut.is_empty());
        assert!(uut.get(1).is_some());
        assert!(uut.get(2).is_none());
        assert_eq!(uut.iter().count(), 2);
    }

    #[test]
    fn empty_collection_fails() {
        let err = SearcherCollection::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ExpectError::EmptyCollection));
    }

    #[test]
    fn mixed_domains_fail() {
        let err = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("")),
            Box::new(BytesSearcher::new(b"")),
        ])
        .unwrap_err();
        assert!(err.is_domain_mismatch());
    }

    #[test]
    fn multi_regex_single_match() {
        let uut = SearcherCollection::new(vec![
            Box::new(RegexSearcher::new("omicron").unwrap()),
            Box::new(RegexSearcher::new("[eu]psilon").unwrap()),
        ])
        .unwrap();
        let m = uut
            .search(Content::Text("pi epsilon iota rho"))
            .unwrap()
            .unwrap();
        assert_eq!(m.searcher_index(), 1);
        assert_eq!(m.start(), 3);
        assert_eq!(m.end(), 10);
    }

    #[test]
    fn lowest_start_offset_wins() {
        let uut = SearcherCollection::new(vec![
            Box::new(RegexSearcher::new("omicron").unwrap()),
            Box::new(RegexSearcher::new("[eu]psilon").unwrap()),
            Box::new(TextSearcher::new("pi")),
            Box::new(TextSearcher::new("iota")),
        ])
        .unwrap();
        let m = uut
            .search(Content::Text("pi iota epsilon upsilon omicron"))
            .unwrap()
            .unwrap();
        assert_eq!(m.searcher_index(), 2);
        assert_eq!(m.start(), 0);
        assert_eq!(m.end(), 2);
    }

    #[test]
    fn ties_go_to_first_declared() {
        let uut = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("ab")),
            Box::new(TextSearcher::new("abc")),
        ])
        .unwrap();
        let m = uut.search(Content::Text("xabc")).unwrap().unwrap();
        assert_eq!(m.searcher_index(), 0);
        assert_eq!(m.matched().as_text(), Some("ab"));
    }

    #[test]
    fn no_member_matches() {
        let uut = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("sigma")),
            Box::new(TextSearcher::new("tau")),
        ])
        .unwrap();
        assert!(uut.search(Content::Text("pi rho")).unwrap().is_none());
    }

    #[test]
    fn wrong_domain_content_fails() {
        let uut = SearcherCollection::new(vec![
            Box::new(RegexSearcher::binary("omicron").unwrap()),
            Box::new(RegexSearcher::binary("[eu]psilon").unwrap()),
        ])
        .unwrap();
        let err = uut.search(Content::Text("pi omicron mu")).unwrap_err();
        assert!(err.is_domain_mismatch());
    }

    #[test]
    fn collections_nest() {
        let inner = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("gamma")),
        ])
        .unwrap();
        let outer = SearcherCollection::new(vec![
            Box::new(TextSearcher::new("delta")),
            Box::new(inner),
        ])
        .unwrap();
        let m = outer.search(Content::Text("beta gamma")).unwrap().unwrap();
        assert_eq!(m.searcher_index(), 1);
        assert_eq!(m.matched().as_text(), Some("gamma"));
    }
}
