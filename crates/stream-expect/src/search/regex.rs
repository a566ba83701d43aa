//! Regular-expression searching over either domain.

use std::collections::HashMap;
use std::fmt;

use crate::content::{Chunk, Content, Domain};
use crate::error::{ExpectError, Result};
use crate::search::matches::{Match, RegexMatch};
use crate::search::searcher::Searcher;

/// Regular-expression search with leftmost-first semantics.
///
/// The domain is inferred from how the searcher is built: pattern strings
/// compile for an explicit domain via [`RegexSearcher::new`] (text) or
/// [`RegexSearcher::binary`] (bytes), and already-compiled engines convert
/// via `From<regex::Regex>` / `From<regex::bytes::Regex>`. Capture groups
/// are surfaced on the resulting [`RegexMatch`], addressable by position or
/// name.
#[derive(Clone)]
pub struct RegexSearcher {
    engine: Engine,
    /// Group-name lookup table, fixed at construction.
    names: HashMap<String, usize>,
}

#[derive(Clone)]
enum Engine {
    Text(regex::Regex),
    Binary(regex::bytes::Regex),
}

impl RegexSearcher {
    /// Compile `pattern` as a text-domain regex.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self::from(regex::Regex::new(pattern)?))
    }

    /// Compile `pattern` as a binary-domain regex.
    ///
    /// The pattern source is still a string; it matches against raw bytes
    /// and may use escapes such as `(?-u:\xFF)` for non-UTF-8 data.
    pub fn binary(pattern: &str) -> Result<Self> {
        Ok(Self::from(regex::bytes::Regex::new(pattern)?))
    }

    /// The source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match &self.engine {
            Engine::Text(re) => re.as_str(),
            Engine::Binary(re) => re.as_str(),
        }
    }

    fn name_table<'a>(names: impl Iterator<Item = Option<&'a str>>) -> HashMap<String, usize> {
        names
            .enumerate()
            .filter_map(|(idx, name)| name.map(|n| (n.to_string(), idx)))
            .collect()
    }
}

impl From<regex::Regex> for RegexSearcher {
    fn from(regex: regex::Regex) -> Self {
        let names = Self::name_table(regex.capture_names());
        Self {
            engine: Engine::Text(regex),
            names,
        }
    }
}

impl From<regex::bytes::Regex> for RegexSearcher {
    fn from(regex: regex::bytes::Regex) -> Self {
        let names = Self::name_table(regex.capture_names());
        Self {
            engine: Engine::Binary(regex),
            names,
        }
    }
}

impl Searcher for RegexSearcher {
    fn domain(&self) -> Domain {
        match self.engine {
            Engine::Text(_) => Domain::Text,
            Engine::Binary(_) => Domain::Binary,
        }
    }

    fn search(&self, content: Content<'_>) -> Result<Option<Match>> {
        match (&self.engine, content) {
            (Engine::Text(re), Content::Text(text)) => Ok(re.captures(text).map(|caps| {
                let whole = caps.get(0).expect("group 0 always participates");
                let groups = caps
                    .iter()
                    .map(|g| g.map(|g| Chunk::Text(g.as_str().to_string())))
                    .collect();
                Match::Regex(RegexMatch::new(
                    whole.start(),
                    whole.end(),
                    Chunk::Text(whole.as_str().to_string()),
                    groups,
                    self.names.clone(),
                ))
            })),
            (Engine::Binary(re), Content::Binary(bytes)) => Ok(re.captures(bytes).map(|caps| {
                let whole = caps.get(0).expect("group 0 always participates");
                let groups = caps
                    .iter()
                    .map(|g| g.map(|g| Chunk::Binary(g.as_bytes().to_vec())))
                    .collect();
                Match::Regex(RegexMatch::new(
                    whole.start(),
                    whole.end(),
                    Chunk::Binary(whole.as_bytes().to_vec()),
                    groups,
                    self.names.clone(),
                ))
            })),
            (_, content) => Err(ExpectError::domain_mismatch(
                "regex search",
                self.domain(),
                content.domain(),
            )),
        }
    }
}

impl fmt::Debug for RegexSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexSearcher")
            .field("domain", &self.domain())
            .field("pattern", &self.pattern())
            .finish()
    }
}
