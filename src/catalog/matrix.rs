//! Dense code-to-code similarity matrix.

use crate::error::{Result, SuggestError};

/// Row-major similarity matrix with `dim` columns.
///
/// Row `i < dim` holds the similarity of code `i` to every code. The last row
/// is the cold-start baseline: with `dim` rows it is the last code's own row,
/// with `dim + 1` rows it is a dedicated baseline row.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: Vec<f32>,
    dim: usize,
    rows: usize,
}

impl SimilarityMatrix {
    /// Build a matrix from rows. Every row must have the same non-zero length
    /// and every value must be finite.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.first().map(Vec::len).unwrap_or(0);
        if dim == 0 {
            return Err(SuggestError::data("similarity matrix is empty"));
        }

        let row_count = rows.len();
        if row_count != dim && row_count != dim + 1 {
            return Err(SuggestError::data(format!(
                "similarity matrix has {row_count} rows for {dim} columns, expected {dim} or {}",
                dim + 1
            )));
        }

        let mut values = Vec::with_capacity(row_count * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(SuggestError::data(format!(
                    "similarity matrix row {i} has {} columns, expected {dim}",
                    row.len()
                )));
            }
            if let Some(j) = row.iter().position(|value| !value.is_finite()) {
                return Err(SuggestError::data(format!(
                    "similarity matrix value at ({i}, {j}) is not finite"
                )));
            }
            values.extend(row);
        }

        Ok(SimilarityMatrix {
            values,
            dim,
            rows: row_count,
        })
    }

    /// Number of columns, equal to the number of codes.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.dim;
        Some(&self.values[start..start + self.dim])
    }

    /// The ranking used when no history entry could be canonicalized.
    pub fn default_row(&self) -> &[f32] {
        let start = (self.rows - 1) * self.dim;
        &self.values[start..]
    }
}
