//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};

/// Configuration fixed for the lifetime of a [`SuggestEngine`](crate::engine::SuggestEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-step decay applied to older history entries (0.0 < rate < 1.0).
    pub discount_rate: f32,
    /// How many of the most recent history entries are considered.
    pub num_recents: usize,
    /// Maximum number of suggestions returned per request.
    pub num_suggestions: usize,
    /// Past queries longer than this many characters are truncated before
    /// deterministic analysis.
    pub max_query_chars: usize,
    /// Codes with more whitespace tokens than this are rejected at load time.
    pub max_code_tokens: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            discount_rate: 0.9,
            num_recents: 10,
            num_suggestions: 30,
            max_query_chars: 64,
            max_code_tokens: 8,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SuggestError::config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.discount_rate.is_finite() || self.discount_rate <= 0.0 || self.discount_rate >= 1.0
        {
            return Err(SuggestError::config(format!(
                "discount_rate must be in the open range (0, 1), got {}",
                self.discount_rate
            )));
        }
        if self.num_suggestions == 0 {
            return Err(SuggestError::config(
                "num_suggestions must be greater than zero",
            ));
        }
        if self.max_query_chars == 0 {
            return Err(SuggestError::config(
                "max_query_chars must be greater than zero",
            ));
        }
        if self.max_code_tokens == 0 {
            return Err(SuggestError::config(
                "max_code_tokens must be greater than zero",
            ));
        }

        Ok(())
    }
}
