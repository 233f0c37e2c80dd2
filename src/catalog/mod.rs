//! Catalog reference data: records, code index, similarity matrix and the
//! lookup tables built from them.

pub mod files;
pub mod index;
pub mod matrix;
pub mod record;
pub mod reference;

// Re-export commonly used types
pub use files::CatalogFiles;
pub use index::BclIndex;
pub use matrix::SimilarityMatrix;
pub use record::{BrandRecord, CategoryRecord, LineRecord};
pub use reference::{CatalogStats, ReferenceData};
