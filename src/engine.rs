//! The suggestion engine: reference tables plus configuration, serving
//! personalized suggestions for a live query.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    CandidateGroup, DeterministicAnalyzer, KeywordSet, QueryAnalyzer, StochasticAnalyzer,
};
use crate::canonicalize::QueryCanonicalizer;
use crate::catalog::{CatalogFiles, CatalogStats, ReferenceData};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::ranking::{PersonalizationRanker, RankedSuggestion};

/// One independent suggestion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub query: String,
    /// Past queries, most recent first.
    #[serde(default)]
    pub history: Vec<String>,
}

/// Personalized autocomplete over a fixed catalog.
///
/// The engine holds no per-user state. History is passed in with every call
/// and only read, so one engine can serve any number of users and threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use catalog_suggest::catalog::{BrandRecord, LineRecord, ReferenceData, SimilarityMatrix};
/// use catalog_suggest::config::EngineConfig;
/// use catalog_suggest::engine::SuggestEngine;
///
/// # fn main() -> catalog_suggest::error::Result<()> {
/// let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]])?;
/// let data = ReferenceData::build(
///     &[BrandRecord::new("ACME")],
///     &[],
///     &[LineRecord::new("RUNNING"), LineRecord::new("CASUAL")],
///     vec!["ACME RUNNING".to_string(), "ACME CASUAL".to_string()],
///     matrix,
///     8,
/// )?;
/// let engine = SuggestEngine::new(Arc::new(data), EngineConfig::default())?;
///
/// let suggestions = engine.suggest("acme", &["ACME RUNNING"]);
/// assert_eq!(suggestions, vec!["ACME RUNNING", "ACME CASUAL"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SuggestEngine {
    data: Arc<ReferenceData>,
    config: EngineConfig,
}

impl SuggestEngine {
    /// Create an engine over already-built reference data.
    pub fn new(data: Arc<ReferenceData>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(SuggestEngine { data, config })
    }

    /// Load the reference files from `dir` and create an engine.
    pub fn from_dir<P: AsRef<Path>>(dir: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let data = CatalogFiles::from_dir(dir).load(config.max_code_tokens)?;
        Self::new(Arc::new(data), config)
    }

    pub fn data(&self) -> &Arc<ReferenceData> {
        &self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> CatalogStats {
        self.data.stats()
    }

    /// Up to `num_suggestions` codes, most relevant first.
    pub fn suggest<S: AsRef<str>>(&self, query: &str, history: &[S]) -> Vec<String> {
        self.suggest_scored(query, history)
            .into_iter()
            .map(|suggestion| suggestion.code)
            .collect()
    }

    /// Like [`suggest`](Self::suggest), keeping each code's index and score.
    pub fn suggest_scored<S: AsRef<str>>(
        &self,
        query: &str,
        history: &[S],
    ) -> Vec<RankedSuggestion> {
        let groups = self.analyze(query);
        let ranker = PersonalizationRanker::new(&self.data, &self.config);

        let scores = ranker.similarity_vector(history);
        if scores.len() != self.data.index().len() {
            log::warn!(
                "similarity vector has {} entries for {} codes",
                scores.len(),
                self.data.index().len()
            );
            return Vec::new();
        }

        let ranking = PersonalizationRanker::rank(&scores);
        let suggestions = ranker.select(&ranking, &scores, &groups, self.config.num_suggestions);
        log::debug!(
            "query {:?}: {} candidate groups, {} suggestions",
            query,
            groups.len(),
            suggestions.len()
        );

        suggestions
    }

    /// Serve independent requests in parallel over the shared tables.
    pub fn suggest_batch(&self, requests: &[SuggestRequest]) -> Vec<Vec<String>> {
        requests
            .par_iter()
            .map(|request| self.suggest(&request.query, &request.history))
            .collect()
    }

    /// Candidate groups for the live query.
    pub fn analyze(&self, query: &str) -> Vec<CandidateGroup> {
        StochasticAnalyzer::new(&self.data).analyze(query)
    }

    /// Canonical names contained in a finished query.
    pub fn keywords(&self, query: &str) -> KeywordSet {
        DeterministicAnalyzer::new(&self.data, self.config.max_query_chars)
            .analyze(&query.to_uppercase())
    }

    /// Canonical code for a past query.
    pub fn canonicalize(&self, query: &str) -> Option<String> {
        QueryCanonicalizer::new(&self.data, self.config.max_query_chars)
            .canonicalize(query)
            .map(str::to_string)
    }

    /// Personalized score of every code, in index order.
    pub fn similarity_vector<S: AsRef<str>>(&self, history: &[S]) -> Vec<f32> {
        PersonalizationRanker::new(&self.data, &self.config).similarity_vector(history)
    }
}
