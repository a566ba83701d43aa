//! Searchers and match records.
//!
//! This module provides the pattern-matching half of the crate: the
//! [`Searcher`] capability, its literal, regex, and collection variants,
//! and the immutable match records they produce.

mod collection;
mod matches;
mod regex;
mod searcher;

pub use collection::SearcherCollection;
pub use matches::{Match, RegexMatch, SequenceMatch};
pub use regex::RegexSearcher;
pub use searcher::{BytesSearcher, Searcher, TextSearcher};
