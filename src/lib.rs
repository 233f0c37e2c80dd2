//! # catalog-suggest
//!
//! Personalized autocomplete for retail catalog queries.
//!
//! Given the text a user is typing and their recent searches, the engine
//! returns ranked Brand-Category-Line ("BCL") codes to suggest.
//!
//! ## Components
//!
//! - [`catalog`]: reference records, the code index, the similarity matrix
//!   and the immutable lookup tables built from them
//! - [`synonym`]: exact alias to canonical-name resolution
//! - [`analysis`]: keyword extraction from live and finished queries
//! - [`canonicalize`]: mapping past queries to their canonical code
//! - [`ranking`]: history-personalized ranking and candidate filtering
//! - [`engine`]: the [`SuggestEngine`](engine::SuggestEngine) tying them together

pub mod analysis;
pub mod canonicalize;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod ranking;
pub mod synonym;

pub mod prelude {
    pub use crate::catalog::{
        BrandRecord, CatalogFiles, CategoryRecord, LineRecord, ReferenceData, SimilarityMatrix,
    };
    pub use crate::config::EngineConfig;
    pub use crate::engine::{SuggestEngine, SuggestRequest};
    pub use crate::error::{Result, SuggestError};
    pub use crate::history::SearchHistory;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
