//! Immutable lookup tables built once from the catalog inputs.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::index::BclIndex;
use crate::catalog::matrix::SimilarityMatrix;
use crate::catalog::record::{BrandRecord, CategoryRecord, LineRecord, split_synonyms};
use crate::error::{Result, SuggestError};
use crate::synonym::{SynonymNamespace, SynonymTable};

/// Everything the engine needs to serve a request.
///
/// Built once by [`ReferenceData::build`] and read-only afterwards, so one
/// instance can be shared behind an `Arc` by every request handler.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    index: BclIndex,
    brand_lines: SynonymTable,
    categories: SynonymTable,
    global: SynonymTable,
    /// Every token-order permutation of every code, mapped to the code's index.
    permutations: AHashMap<String, usize>,
    matrix: SimilarityMatrix,
}

/// Table sizes, reported after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub codes: usize,
    pub brand_line_synonyms: usize,
    pub category_synonyms: usize,
    pub global_synonyms: usize,
    pub permutations: usize,
    pub matrix_rows: usize,
}

impl ReferenceData {
    /// Build all lookup tables.
    ///
    /// Records are registered brands first, then categories, then lines; an
    /// alias seen again in a later record is overwritten by it. Fails if any
    /// code has more than `max_code_tokens` tokens or if the matrix does not
    /// have one column per code.
    pub fn build(
        brands: &[BrandRecord],
        categories: &[CategoryRecord],
        lines: &[LineRecord],
        codes: Vec<String>,
        matrix: SimilarityMatrix,
        max_code_tokens: usize,
    ) -> Result<Self> {
        let index = BclIndex::new(codes)?;
        if index.is_empty() {
            return Err(SuggestError::data("BCL code list is empty"));
        }
        if matrix.dim() != index.len() {
            return Err(SuggestError::data(format!(
                "similarity matrix has {} columns but there are {} BCL codes",
                matrix.dim(),
                index.len()
            )));
        }
        log::debug!("indexed {} BCL codes", index.len());

        let mut tables = SynonymTables::default();
        for brand in brands {
            tables.register(
                SynonymNamespace::BrandLine,
                &brand.name,
                brand.name_eng.as_deref(),
                &brand.synonyms,
            );
        }
        for category in categories {
            tables.register(
                SynonymNamespace::Category,
                &category.name,
                None,
                &category.synonyms,
            );
        }
        for line in lines {
            tables.register(SynonymNamespace::BrandLine, &line.name, None, &line.synonyms);
        }
        tables.reassert_canonical();
        log::debug!(
            "registered {} brand/line and {} category synonyms",
            tables.brand_lines.len(),
            tables.categories.len()
        );

        let permutations = build_permutations(&index, max_code_tokens)?;
        log::debug!("expanded {} code permutations", permutations.len());

        let data = ReferenceData {
            index,
            brand_lines: tables.brand_lines,
            categories: tables.categories,
            global: tables.global,
            permutations,
            matrix,
        };

        let stats = data.stats();
        log::info!(
            "reference data ready: {} codes, {} synonyms, {} permutations",
            stats.codes,
            stats.global_synonyms,
            stats.permutations
        );

        Ok(data)
    }

    pub fn index(&self) -> &BclIndex {
        &self.index
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn synonyms(&self, namespace: SynonymNamespace) -> &SynonymTable {
        match namespace {
            SynonymNamespace::BrandLine => &self.brand_lines,
            SynonymNamespace::Category => &self.categories,
            SynonymNamespace::Global => &self.global,
        }
    }

    /// Resolve an alias through the global table.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.global.resolve(alias)
    }

    /// Look up a code by any token-order permutation of it.
    pub fn permutation(&self, text: &str) -> Option<&str> {
        self.permutations
            .get(text)
            .and_then(|&idx| self.index.code(idx))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            codes: self.index.len(),
            brand_line_synonyms: self.brand_lines.len(),
            category_synonyms: self.categories.len(),
            global_synonyms: self.global.len(),
            permutations: self.permutations.len(),
            matrix_rows: self.matrix.row_count(),
        }
    }
}

#[derive(Default)]
struct SynonymTables {
    brand_lines: SynonymTable,
    categories: SynonymTable,
    global: SynonymTable,
    /// Canonical names in registration order, with their namespace.
    canonical: Vec<(SynonymNamespace, String)>,
}

impl SynonymTables {
    fn register(
        &mut self,
        namespace: SynonymNamespace,
        name: &str,
        alias: Option<&str>,
        synonyms: &str,
    ) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        self.insert(namespace, name.to_string(), name);
        if let Some(alias) = alias.map(str::trim).filter(|alias| !alias.is_empty()) {
            self.insert(namespace, alias.to_string(), name);
        }
        for synonym in split_synonyms(synonyms) {
            self.insert(namespace, synonym.to_string(), name);
        }

        self.canonical.push((namespace, name.to_string()));
    }

    fn insert(&mut self, namespace: SynonymNamespace, key: String, name: &str) {
        let table = match namespace {
            SynonymNamespace::Category => &mut self.categories,
            _ => &mut self.brand_lines,
        };
        table.insert(key.clone(), name);
        self.global.insert(key, name);
    }

    /// A canonical name resolves to itself even if a later alias shadowed it.
    fn reassert_canonical(&mut self) {
        for (namespace, name) in std::mem::take(&mut self.canonical) {
            self.insert(namespace, name.clone(), &name);
        }
    }
}

fn build_permutations(index: &BclIndex, max_code_tokens: usize) -> Result<AHashMap<String, usize>> {
    let mut permutations = AHashMap::with_capacity(index.len() * 6);

    for (idx, code) in index.codes().iter().enumerate() {
        let mut tokens: Vec<&str> = code.split_whitespace().collect();
        if tokens.len() > max_code_tokens {
            return Err(SuggestError::data(format!(
                "BCL code '{code}' has {} tokens, more than the limit of {max_code_tokens}",
                tokens.len()
            )));
        }
        for_each_permutation(&mut tokens, |permutation| {
            permutations.insert(permutation.join(" "), idx);
        });
    }

    for (idx, code) in index.codes().iter().enumerate() {
        permutations.insert(code.clone(), idx);
    }

    Ok(permutations)
}

/// Visit every ordering of `items` (Heap's algorithm), starting with the identity.
fn for_each_permutation<T, F>(items: &mut [T], mut visit: F)
where
    F: FnMut(&[T]),
{
    let n = items.len();
    let mut counters = vec![0usize; n];
    visit(items);

    let mut i = 0;
    while i < n {
        if counters[i] < i {
            let j = if i % 2 == 0 { 0 } else { counters[i] };
            items.swap(i, j);
            visit(items);
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceData {
        let brands = vec![
            BrandRecord::new(" ACME ")
                .with_name_eng(" ACME CO ")
                .with_synonyms("ACM|아크미"),
            BrandRecord::new("   ").with_synonyms("GHOST"),
        ];
        let categories = vec![CategoryRecord::new("SHOES").with_synonyms("SHOE| SNEAKERS ")];
        let lines = vec![
            LineRecord::new("RUNNING").with_synonyms("RUN"),
            LineRecord::new("CASUAL"),
        ];
        let codes = vec![
            "ACME SHOES RUNNING".to_string(),
            "ACME SHOES CASUAL".to_string(),
        ];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();

        ReferenceData::build(&brands, &categories, &lines, codes, matrix, 8).unwrap()
    }

    #[test]
    fn test_synonym_registration() {
        let data = sample();
        let brand_lines = data.synonyms(SynonymNamespace::BrandLine);
        let categories = data.synonyms(SynonymNamespace::Category);

        assert_eq!(brand_lines.resolve("ACME"), Some("ACME"));
        assert_eq!(brand_lines.resolve("ACME CO"), Some("ACME"));
        assert_eq!(brand_lines.resolve("ACM"), Some("ACME"));
        assert_eq!(brand_lines.resolve("아크미"), Some("ACME"));
        assert_eq!(brand_lines.resolve("RUN"), Some("RUNNING"));
        assert_eq!(brand_lines.resolve("SHOES"), None);
        assert_eq!(brand_lines.resolve("GHOST"), None);

        assert_eq!(categories.resolve("SHOE"), Some("SHOES"));
        assert_eq!(categories.resolve("SNEAKERS"), Some("SHOES"));
        assert_eq!(categories.resolve("ACME"), None);

        assert_eq!(data.resolve("SHOE"), Some("SHOES"));
        assert_eq!(data.resolve("RUN"), Some("RUNNING"));
    }

    #[test]
    fn test_aliases_are_stored_verbatim() {
        let brands = vec![
            BrandRecord::new("나이키")
                .with_name_eng("Nike")
                .with_synonyms("nikey"),
        ];
        let codes = vec!["나이키".to_string()];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();

        let data = ReferenceData::build(&brands, &[], &[], codes, matrix, 8).unwrap();
        let brand_lines = data.synonyms(SynonymNamespace::BrandLine);

        assert_eq!(brand_lines.resolve("Nike"), Some("나이키"));
        assert_eq!(brand_lines.resolve("nikey"), Some("나이키"));
        assert_eq!(brand_lines.resolve("NIKE"), None);
        assert_eq!(data.resolve("NIKEY"), None);
    }

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        let brands = vec![BrandRecord::new("POLO")];
        let categories = vec![CategoryRecord::new("SHIRTS").with_synonyms("POLO")];
        let codes = vec!["POLO SHIRTS".to_string()];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();

        let data = ReferenceData::build(&brands, &categories, &[], codes, matrix, 8).unwrap();

        assert_eq!(data.resolve("POLO"), Some("POLO"));
        assert_eq!(data.resolve("SHIRTS"), Some("SHIRTS"));
        assert_eq!(
            data.synonyms(SynonymNamespace::Category).resolve("POLO"),
            Some("SHIRTS")
        );
    }

    #[test]
    fn test_every_permutation_maps_to_code() {
        let data = sample();
        for text in [
            "ACME SHOES RUNNING",
            "ACME RUNNING SHOES",
            "SHOES ACME RUNNING",
            "SHOES RUNNING ACME",
            "RUNNING ACME SHOES",
            "RUNNING SHOES ACME",
        ] {
            assert_eq!(data.permutation(text), Some("ACME SHOES RUNNING"));
        }
        assert_eq!(data.permutation("ACME SHOES"), None);
        assert_eq!(data.stats().permutations, 12);
    }

    #[test]
    fn test_permuted_codes_keep_identity() {
        let codes = vec!["A B".to_string(), "B A".to_string()];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let data = ReferenceData::build(&[], &[], &[], codes, matrix, 8).unwrap();

        assert_eq!(data.permutation("A B"), Some("A B"));
        assert_eq!(data.permutation("B A"), Some("B A"));
    }

    #[test]
    fn test_heap_permutation_count() {
        let mut items = vec![1, 2, 3, 4];
        let mut seen = Vec::new();
        for_each_permutation(&mut items, |p| seen.push(p.to_vec()));

        assert_eq!(seen.len(), 24);
        assert_eq!(seen[0], vec![1, 2, 3, 4]);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let codes = vec!["A B".to_string(), "C D".to_string(), "E F".to_string()];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();

        let result = ReferenceData::build(&[], &[], &[], codes, matrix, 8);
        assert!(matches!(result, Err(SuggestError::Data(_))));
    }

    #[test]
    fn test_token_limit_is_fatal() {
        let codes = vec!["A B C D".to_string()];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();

        let result = ReferenceData::build(&[], &[], &[], codes, matrix, 3);
        assert!(matches!(result, Err(SuggestError::Data(_))));
    }
}
