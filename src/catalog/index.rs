//! Bijection between BCL codes and their contiguous integer indices.

use ahash::AHashMap;

use crate::error::{Result, SuggestError};

/// Ordered list of BCL codes. Position `i` in the list is the code's index and
/// addresses row and column `i` of the similarity matrix.
#[derive(Debug, Clone)]
pub struct BclIndex {
    codes: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl BclIndex {
    /// Build the index. Empty and duplicate codes break the bijection and are rejected.
    pub fn new<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        let mut positions = AHashMap::with_capacity(codes.len());

        for (idx, code) in codes.iter().enumerate() {
            if code.trim().is_empty() {
                return Err(SuggestError::data(format!("BCL code at index {idx} is empty")));
            }
            if let Some(first) = positions.insert(code.clone(), idx) {
                return Err(SuggestError::data(format!(
                    "BCL code '{code}' appears at both index {first} and {idx}"
                )));
            }
        }

        Ok(BclIndex { codes, positions })
    }

    pub fn code(&self, index: usize) -> Option<&str> {
        self.codes.get(index).map(String::as_str)
    }

    pub fn index(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in index order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}
