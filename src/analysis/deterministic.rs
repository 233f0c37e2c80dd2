//! Exhaustive longest-substring analysis of a finished query.

use crate::analysis::{KeywordSet, QueryAnalyzer, char_boundaries, truncate_chars};
use crate::catalog::ReferenceData;

/// Finds the canonical names contained in a query.
///
/// Within a range of the query, the longest substring present in the global
/// synonym table wins; among substrings of equal length the right-most one
/// wins. The text strictly before and strictly after the match is then
/// searched the same way. The resulting names are ordered by the position of
/// their match, left to right, and de-duplicated.
///
/// The search is exponential in the worst case, so the input is cut to
/// `max_chars` characters first.
pub struct DeterministicAnalyzer<'a> {
    data: &'a ReferenceData,
    max_chars: usize,
}

impl<'a> DeterministicAnalyzer<'a> {
    pub fn new(data: &'a ReferenceData, max_chars: usize) -> Self {
        DeterministicAnalyzer { data, max_chars }
    }

    /// Longest, then right-most, match inside the char range `start..end`.
    /// Returns `(offset, length, canonical)` in chars.
    fn longest_match(
        &self,
        text: &str,
        bounds: &[usize],
        start: usize,
        end: usize,
    ) -> Option<(usize, usize, &'a str)> {
        for length in (1..=end - start).rev() {
            for offset in (start..=end - length).rev() {
                let candidate = &text[bounds[offset]..bounds[offset + length]];
                if let Some(canonical) = self.data.resolve(candidate) {
                    return Some((offset, length, canonical));
                }
            }
        }
        None
    }
}

impl QueryAnalyzer for DeterministicAnalyzer<'_> {
    type Output = KeywordSet;

    fn analyze(&self, query: &str) -> KeywordSet {
        let text = truncate_chars(query, self.max_chars);
        let bounds = char_boundaries(text);

        let mut found: Vec<(usize, &str)> = Vec::new();
        let mut ranges = vec![(0, bounds.len() - 1)];

        while let Some((start, end)) = ranges.pop() {
            if let Some((offset, length, canonical)) = self.longest_match(text, &bounds, start, end)
            {
                found.push((offset, canonical));
                ranges.push((start, offset));
                ranges.push((offset + length, end));
            }
        }

        found.sort_by_key(|&(offset, _)| offset);

        let mut keywords = KeywordSet::new();
        for (_, canonical) in found {
            keywords.push(canonical);
        }
        keywords
    }

    fn name(&self) -> &str {
        "deterministic"
    }
}
