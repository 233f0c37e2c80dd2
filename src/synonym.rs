//! Alias to canonical-name resolution.

use ahash::AHashMap;

/// The namespaces a catalog name can be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynonymNamespace {
    /// Brand and line names share one table.
    BrandLine,
    /// Category names.
    Category,
    /// Every name from every namespace.
    Global,
}

/// Exact-match mapping from an alias to its canonical name.
///
/// Canonical names map to themselves. Lookups are case-sensitive and compare
/// whole strings; names are trimmed when they are registered, never when
/// they are looked up.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: AHashMap<String, String>,
}

impl SynonymTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SynonymTable {
            entries: AHashMap::new(),
        }
    }

    /// Register `alias` for `canonical`. A later insert of the same alias wins.
    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(alias.into(), canonical.into());
    }

    /// Resolve an alias to its canonical name.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(alias, canonical)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }
}
