//! Keyword extraction from query text.
//!
//! Two strategies share the [`QueryAnalyzer`] interface:
//! - [`StochasticAnalyzer`]: greedy longest-prefix matching over the live,
//!   still-being-typed query. Produces one candidate group per segment.
//! - [`DeterministicAnalyzer`]: exhaustive longest-substring matching over a
//!   finished query. Produces the set of canonical names it contains.
//!
//! Neither strategy guarantees an optimal segmentation, and a query that
//! matches nothing yields an empty result rather than an error.

mod deterministic;
mod stochastic;

pub use deterministic::DeterministicAnalyzer;
pub use stochastic::StochasticAnalyzer;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Query analysis strategy.
pub trait QueryAnalyzer {
    type Output;

    /// Extract keywords from `query`. Never fails; no match means an empty output.
    fn analyze(&self, query: &str) -> Self::Output;

    /// Get the name of this analyzer for logging.
    fn name(&self) -> &str;
}

/// Canonical names matched by one segment of the live query.
///
/// A code satisfies the group if it contains at least one of the names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateGroup(BTreeSet<String>);

impl CandidateGroup {
    pub fn new() -> Self {
        CandidateGroup(BTreeSet::new())
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if `code` contains any name of the group as a substring.
    pub fn matches(&self, code: &str) -> bool {
        self.0.iter().any(|name| code.contains(name.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateGroup {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CandidateGroup(iter.into_iter().map(Into::into).collect())
    }
}

/// Distinct canonical names found in a query, ordered by where they occur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new() -> Self {
        KeywordSet(Vec::new())
    }

    /// Append `name` unless it is already present.
    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.0.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Uppercase the live query and strip all whitespace.
pub fn normalize_live_query(query: &str) -> String {
    query
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Byte offset of every char boundary in `text`, including the end.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}
