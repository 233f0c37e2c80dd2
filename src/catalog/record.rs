//! Raw reference records as they arrive from the catalog files.

use serde::{Deserialize, Serialize};

/// A brand with an optional English alias and pipe-delimited synonyms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandRecord {
    pub name: String,
    pub name_eng: Option<String>,
    /// Pipe-delimited, e.g. `"NIKE|NIKEY"`.
    pub synonyms: String,
}

impl BrandRecord {
    pub fn new(name: impl Into<String>) -> Self {
        BrandRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name_eng(mut self, name_eng: impl Into<String>) -> Self {
        self.name_eng = Some(name_eng.into());
        self
    }

    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = synonyms.into();
        self
    }
}

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRecord {
    pub name: String,
    pub synonyms: String,
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        CategoryRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = synonyms.into();
        self
    }
}

/// A product line within a brand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRecord {
    pub name: String,
    pub synonyms: String,
}

impl LineRecord {
    pub fn new(name: impl Into<String>) -> Self {
        LineRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_synonyms(mut self, synonyms: impl Into<String>) -> Self {
        self.synonyms = synonyms.into();
        self
    }
}

/// Split a pipe-delimited synonym list, dropping blank entries.
pub(crate) fn split_synonyms(synonyms: &str) -> impl Iterator<Item = &str> {
    synonyms
        .split('|')
        .map(str::trim)
        .filter(|synonym| !synonym.is_empty())
}
