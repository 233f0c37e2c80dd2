//! History-personalized ranking of BCL codes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::analysis::CandidateGroup;
use crate::canonicalize::QueryCanonicalizer;
use crate::catalog::ReferenceData;
use crate::config::EngineConfig;

/// A ranked code with the score that placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSuggestion {
    pub code: String,
    pub index: usize,
    pub score: f32,
}

/// Scores every code from the similarity rows of recently searched codes.
pub struct PersonalizationRanker<'a> {
    data: &'a ReferenceData,
    canonicalizer: QueryCanonicalizer<'a>,
    discount_rate: f32,
    num_recents: usize,
}

impl<'a> PersonalizationRanker<'a> {
    pub fn new(data: &'a ReferenceData, config: &EngineConfig) -> Self {
        PersonalizationRanker {
            data,
            canonicalizer: QueryCanonicalizer::new(data, config.max_query_chars),
            discount_rate: config.discount_rate,
            num_recents: config.num_recents,
        }
    }

    /// Decayed sum of the similarity rows of the history's codes.
    ///
    /// Only the first `num_recents` entries (most recent first) are read.
    /// Entries that name no code are skipped and do not consume a decay step.
    /// If no entry names a code, the matrix's baseline row is returned.
    pub fn similarity_vector<S: AsRef<str>>(&self, history: &[S]) -> Vec<f32> {
        let matrix = self.data.matrix();
        let mut scores = vec![0.0f32; matrix.dim()];
        let mut decay = 1.0f32;
        let mut applied = 0usize;

        for query in history.iter().take(self.num_recents) {
            let Some(code) = self.canonicalizer.canonicalize(query.as_ref()) else {
                continue;
            };
            let Some(row) = self.data.index().index(code).and_then(|idx| matrix.row(idx)) else {
                continue;
            };

            for (score, similarity) in scores.iter_mut().zip(row) {
                *score += decay * similarity;
            }
            decay *= self.discount_rate;
            applied += 1;
        }

        if applied == 0 {
            log::debug!("no canonical history entry, using the cold-start ranking");
            return matrix.default_row().to_vec();
        }
        log::debug!("personalized ranking from {applied} history entries");

        scores
    }

    /// Code indices by descending score; equal scores keep ascending index order.
    pub fn rank(scores: &[f32]) -> Vec<usize> {
        let mut ranking: Vec<usize> = (0..scores.len()).collect();
        ranking.sort_by(|&a, &b| compare_scores(scores[b], scores[a]));
        ranking
    }

    /// Walk `ranking` and keep codes that satisfy every candidate group, up to `limit`.
    ///
    /// With no groups, the top `limit` codes are kept unfiltered.
    pub fn select(
        &self,
        ranking: &[usize],
        scores: &[f32],
        groups: &[CandidateGroup],
        limit: usize,
    ) -> Vec<RankedSuggestion> {
        let index = self.data.index();

        ranking
            .iter()
            .filter_map(|&idx| index.code(idx).map(|code| (idx, code)))
            .filter(|(_, code)| groups.iter().all(|group| group.matches(code)))
            .take(limit)
            .map(|(idx, code)| RankedSuggestion {
                code: code.to_string(),
                index: idx,
                score: scores.get(idx).copied().unwrap_or(0.0),
            })
            .collect()
    }
}

/// NaN sorts below every number and the two zeros compare equal.
fn compare_scores(a: f32, b: f32) -> Ordering {
    fn key(score: f32) -> f32 {
        if score.is_nan() {
            f32::NEG_INFINITY
        } else if score == 0.0 {
            0.0
        } else {
            score
        }
    }
    key(a).total_cmp(&key(b))
}
