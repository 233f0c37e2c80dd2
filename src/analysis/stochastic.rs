//! Greedy longest-prefix analysis of the live query.

use crate::analysis::{CandidateGroup, QueryAnalyzer, char_boundaries, normalize_live_query};
use crate::catalog::ReferenceData;
use crate::synonym::SynonymNamespace;

/// Splits the live query into segments from left to right.
///
/// For the remaining text, the longest prefix that any brand/line key starts
/// with, or any category key contains, becomes a segment. Every key it hits
/// contributes its canonical name to the segment's [`CandidateGroup`]. The
/// text after the segment is analyzed the same way; the walk stops at the
/// first remainder that matches nothing.
pub struct StochasticAnalyzer<'a> {
    data: &'a ReferenceData,
}

impl<'a> StochasticAnalyzer<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        StochasticAnalyzer { data }
    }

    /// Collect every canonical name reachable from `prefix`.
    fn candidates(&self, prefix: &str) -> CandidateGroup {
        let mut group = CandidateGroup::new();

        for (key, canonical) in self.data.synonyms(SynonymNamespace::BrandLine).iter() {
            if key.starts_with(prefix) {
                group.insert(canonical);
            }
        }
        for (key, canonical) in self.data.synonyms(SynonymNamespace::Category).iter() {
            if key.contains(prefix) {
                group.insert(canonical);
            }
        }

        group
    }
}

impl QueryAnalyzer for StochasticAnalyzer<'_> {
    type Output = Vec<CandidateGroup>;

    fn analyze(&self, query: &str) -> Vec<CandidateGroup> {
        let normalized = normalize_live_query(query);
        let mut remaining = normalized.as_str();
        let mut groups = Vec::new();

        'segments: while !remaining.is_empty() {
            let bounds = char_boundaries(remaining);
            for length in (1..bounds.len()).rev() {
                let end = bounds[length];
                let group = self.candidates(&remaining[..end]);
                if !group.is_empty() {
                    groups.push(group);
                    remaining = &remaining[end..];
                    continue 'segments;
                }
            }
            break;
        }

        groups
    }

    fn name(&self) -> &str {
        "stochastic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BrandRecord, CategoryRecord, LineRecord, SimilarityMatrix};

    fn sample() -> ReferenceData {
        let brands = vec![
            BrandRecord::new("ACME").with_synonyms("AKME"),
            BrandRecord::new("ACORN"),
        ];
        let categories = vec![
            CategoryRecord::new("SHOES").with_synonyms("SNEAKERS"),
            CategoryRecord::new("BAGS"),
        ];
        let lines = vec![LineRecord::new("RUNNING")];
        let codes = vec![
            "ACME SHOES RUNNING".to_string(),
            "ACORN BAGS".to_string(),
        ];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();

        ReferenceData::build(&brands, &categories, &lines, codes, matrix, 8).unwrap()
    }

    fn names(group: &CandidateGroup) -> Vec<&str> {
        group.iter().collect()
    }

    #[test]
    fn test_prefix_groups() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        let groups = analyzer.analyze("ac");
        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["ACME", "ACORN"]);

        let groups = analyzer.analyze("acme");
        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["ACME"]);
    }

    #[test]
    fn test_segments_left_to_right() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        let groups = analyzer.analyze("acme sho");
        assert_eq!(groups.len(), 2);
        assert_eq!(names(&groups[0]), vec!["ACME"]);
        assert_eq!(names(&groups[1]), vec!["SHOES"]);
    }

    #[test]
    fn test_category_substring_match() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        // "AKER" only occurs inside the category synonym "SNEAKERS"
        let groups = analyzer.analyze("aker");
        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["SHOES"]);
    }

    #[test]
    fn test_unmatched_tail_is_dropped() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        let groups = analyzer.analyze("acmeqqq");
        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["ACME"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        assert!(analyzer.analyze("qqq").is_empty());
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("   ").is_empty());
    }

    #[test]
    fn test_long_query_keeps_trailing_segments() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        let query = format!("{}bags", "running ".repeat(10));
        let groups = analyzer.analyze(&query);
        assert_eq!(groups.len(), 11);
        assert_eq!(names(&groups[0]), vec!["RUNNING"]);
        assert_eq!(names(&groups[10]), vec!["BAGS"]);
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let data = sample();
        let analyzer = StochasticAnalyzer::new(&data);

        assert_eq!(analyzer.analyze("acmebags"), analyzer.analyze("acmebags"));
    }
}
