//! Reading the catalog reference files from a data directory.
//!
//! The directory holds five CSV files:
//!
//! ```text
//! brands.csv             name,name_eng,synonyms    (header row)
//! categories.csv         name,synonyms             (header row)
//! lines.csv              name,synonyms             (header row)
//! bcl_indexing.csv       one code per line         (no header)
//! similarity_matrix.csv  one row of floats per line (no header)
//! ```
//!
//! Extra columns in the record files (such as a leading id) are ignored and
//! missing cells read as empty.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;

use crate::catalog::matrix::SimilarityMatrix;
use crate::catalog::record::{BrandRecord, CategoryRecord, LineRecord};
use crate::catalog::reference::ReferenceData;
use crate::error::{Result, SuggestError};

/// Locations of the five reference files.
#[derive(Debug, Clone)]
pub struct CatalogFiles {
    pub brands: PathBuf,
    pub categories: PathBuf,
    pub lines: PathBuf,
    pub bcl_indexing: PathBuf,
    pub similarity_matrix: PathBuf,
}

impl CatalogFiles {
    /// Use the default file names inside `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        CatalogFiles {
            brands: dir.join("brands.csv"),
            categories: dir.join("categories.csv"),
            lines: dir.join("lines.csv"),
            bcl_indexing: dir.join("bcl_indexing.csv"),
            similarity_matrix: dir.join("similarity_matrix.csv"),
        }
    }

    /// Read every file and build the reference tables.
    pub fn load(&self, max_code_tokens: usize) -> Result<ReferenceData> {
        log::info!("loading catalog from {}", self.brands.display());

        let brands: Vec<BrandRecord> = read_records(open(&self.brands)?)?;
        let categories: Vec<CategoryRecord> = read_records(open(&self.categories)?)?;
        let lines: Vec<LineRecord> = read_records(open(&self.lines)?)?;
        log::debug!(
            "read {} brands, {} categories, {} lines",
            brands.len(),
            categories.len(),
            lines.len()
        );

        let codes = read_codes(open(&self.bcl_indexing)?)?;
        let matrix = read_matrix(open(&self.similarity_matrix)?)?;

        ReferenceData::build(&brands, &categories, &lines, codes, matrix, max_code_tokens)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        SuggestError::data(format!("Failed to open '{}': {}", path.display(), e))
    })
}

/// Deserialize header-addressed records.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }

    Ok(records)
}

/// Read the ordered code list from the first column.
pub fn read_codes<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut codes = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let code = record.get(0).ok_or_else(|| {
            SuggestError::data(format!("bcl_indexing line {} has no code", line + 1))
        })?;
        codes.push(code.to_string());
    }

    Ok(codes)
}

/// Read the similarity matrix, one row per line.
pub fn read_matrix<R: Read>(reader: R) -> Result<SimilarityMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, value)| {
                value.parse::<f32>().map_err(|e| {
                    SuggestError::data(format!(
                        "similarity matrix value '{value}' at ({i}, {j}) is not a number: {e}"
                    ))
                })
            })
            .collect::<Result<Vec<f32>>>()?;
        rows.push(row);
    }

    SimilarityMatrix::from_rows(rows)
}
