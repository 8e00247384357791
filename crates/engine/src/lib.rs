//! `crosscheck-engine` — truth-vs-extract field reconciliation engine.
//!
//! Pure engine crate: receives a pre-parsed truth collection and pre-loaded
//! extract rows, returns a field-by-field comparison table. No CLI or IO
//! dependencies.

pub mod builder;
pub mod error;
pub mod filename;
pub mod index;
pub mod mapping;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod path;

pub use builder::{build_comparison, build_identity_index, reconcile};
pub use error::CompareError;
pub use index::{IdentityIndex, IndexStats};
pub use mapping::{FieldMapping, FieldRule};
pub use matcher::MatchStrategy;
pub use model::{CompareResult, CompareSummary, ComparisonTable, ExtractRow, TruthRecord, Verdict};
pub use path::Selector;
