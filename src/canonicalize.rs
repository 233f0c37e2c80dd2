//! Mapping past queries to their canonical BCL code.

use crate::analysis::{DeterministicAnalyzer, QueryAnalyzer};
use crate::catalog::ReferenceData;

/// Maps a raw historical query to the BCL code it refers to.
///
/// In order:
/// 1. the raw text is looked up as a token permutation of a code;
/// 2. the uppercased text is looked up the same way;
/// 3. the uppercased text is analyzed with [`DeterministicAnalyzer`] and
///    every combination of the found names, largest first, is joined with
///    single spaces and looked up. The first hit wins.
pub struct QueryCanonicalizer<'a> {
    data: &'a ReferenceData,
    analyzer: DeterministicAnalyzer<'a>,
}

impl<'a> QueryCanonicalizer<'a> {
    pub fn new(data: &'a ReferenceData, max_query_chars: usize) -> Self {
        QueryCanonicalizer {
            data,
            analyzer: DeterministicAnalyzer::new(data, max_query_chars),
        }
    }

    /// Canonical code for `query`, or `None` if it names no code.
    pub fn canonicalize(&self, query: &str) -> Option<&'a str> {
        if let Some(code) = self.data.permutation(query) {
            return Some(code);
        }

        let upper = query.to_uppercase();
        if let Some(code) = self.data.permutation(&upper) {
            return Some(code);
        }

        let keywords = self.analyzer.analyze(&upper);
        let names = keywords.as_slice();
        if names.is_empty() {
            return None;
        }

        for size in (1..=names.len()).rev() {
            for combination in Combinations::new(names.len(), size) {
                let joined = combination
                    .iter()
                    .map(|&i| names[i].as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some(code) = self.data.permutation(&joined) {
                    return Some(code);
                }
            }
        }

        None
    }
}

/// Index combinations of `size` out of `n`, in lexicographic order.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, size: usize) -> Self {
        Combinations {
            n,
            indices: (0..size).collect(),
            done: size > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let size = self.indices.len();
        let mut i = size;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - size + i {
                self.indices[i] += 1;
                for j in i + 1..size {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}
