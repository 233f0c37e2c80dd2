//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::{CandidateGroup, KeywordSet};
use crate::catalog::CatalogStats;
use crate::cli::args::{OutputFormat, SuggestArgs};
use crate::error::Result;
use crate::ranking::RankedSuggestion;

/// Result structure for a suggestion request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub query: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored: Option<Vec<RankedSuggestion>>,
    pub duration_us: u64,
}

/// Result structure for canonicalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanonicalizationResult {
    pub mappings: Vec<CanonicalMapping>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CanonicalMapping {
    pub query: String,
    pub code: Option<String>,
}

/// Result structure for query analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    pub candidate_groups: Vec<CandidateGroup>,
    pub keywords: KeywordSet,
    pub canonical: Option<String>,
}

/// Result structure for batch serving.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<Vec<String>>,
    pub requests: usize,
    pub duration_ms: u64,
}

/// Rendering for human-readable output.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

impl HumanOutput for SuggestionResult {
    fn render_human(&self) -> String {
        let mut out = format!("Suggestions for {:?}:\n", self.query);
        match &self.scored {
            Some(scored) => {
                for (i, suggestion) in scored.iter().enumerate() {
                    out.push_str(&format!(
                        "{:>3}. {} (score: {:.4})\n",
                        i + 1,
                        suggestion.code,
                        suggestion.score
                    ));
                }
            }
            None => {
                for (i, code) in self.suggestions.iter().enumerate() {
                    out.push_str(&format!("{:>3}. {}\n", i + 1, code));
                }
            }
        }
        if self.suggestions.is_empty() {
            out.push_str("  (no suggestions)\n");
        }
        out.push_str(&format!("Time: {}us", self.duration_us));
        out
    }
}

impl HumanOutput for CanonicalizationResult {
    fn render_human(&self) -> String {
        self.mappings
            .iter()
            .map(|mapping| {
                format!(
                    "{} => {}",
                    mapping.query,
                    mapping.code.as_deref().unwrap_or("(none)")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl HumanOutput for AnalysisResult {
    fn render_human(&self) -> String {
        let mut out = format!("Query: {:?}\n", self.query);

        out.push_str("Candidate groups:\n");
        if self.candidate_groups.is_empty() {
            out.push_str("  (none)\n");
        }
        for (i, group) in self.candidate_groups.iter().enumerate() {
            out.push_str(&format!(
                "  {}: {}\n",
                i + 1,
                group.iter().collect::<Vec<_>>().join(" | ")
            ));
        }

        out.push_str(&format!(
            "Keywords: {}\n",
            self.keywords.iter().collect::<Vec<_>>().join(", ")
        ));
        out.push_str(&format!(
            "Canonical: {}",
            self.canonical.as_deref().unwrap_or("(none)")
        ));
        out
    }
}

impl HumanOutput for BatchResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for (i, result) in self.results.iter().enumerate() {
            out.push_str(&format!("{}: {}\n", i + 1, result.join(" | ")));
        }
        out.push_str(&format!(
            "Served {} requests in {}ms",
            self.requests, self.duration_ms
        ));
        out
    }
}

impl HumanOutput for CatalogStats {
    fn render_human(&self) -> String {
        [
            "Catalog Statistics:".to_string(),
            "═══════════════════".to_string(),
            format!("BCL codes: {}", self.codes),
            format!("Brand/line synonyms: {}", self.brand_line_synonyms),
            format!("Category synonyms: {}", self.category_synonyms),
            format!("Global synonyms: {}", self.global_synonyms),
            format!("Code permutations: {}", self.permutations),
            format!("Similarity matrix rows: {}", self.matrix_rows),
        ]
        .join("\n")
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(result: &T, args: &SuggestArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    println!("{}", format_result(result, args.output_format, args.pretty)?);
    Ok(())
}

/// Format a result without printing it.
pub fn format_result<T>(result: &T, format: OutputFormat, pretty: bool) -> Result<String>
where
    T: Serialize + HumanOutput,
{
    match format {
        OutputFormat::Human => Ok(result.render_human()),
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}
