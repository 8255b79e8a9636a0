//! Deterministic analysis core for Likert-scale survey responses.
//!
//! The crate turns a validated matrix of ordinal ratings into reliability,
//! per-item, correlation, distribution and group-comparison statistics.
//! All computations are pure and synchronous; the caller owns every
//! intermediate and passes it forward explicitly. File formats, charts and
//! UI state live outside this crate.

pub mod analysis;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod report;

pub use analysis::{SurveyAnalysis, run_analysis};
pub use error::AnalysisError;
pub use input::RawTable;
pub use model::matrix::ScaleMatrix;
pub use model::options::AnalysisOptions;
