use thiserror::Error;

/// Recoverable analysis failures. Every variant carries its cause; no
/// computation is allowed to surface a silent NaN where one of these is
/// more informative.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Malformed or insufficient input columns.
    #[error("schema error: {0}")]
    Schema(String),

    /// Zero variance or another condition that leaves a statistic undefined.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Fewer than the three distinct groups the omnibus test requires.
    #[error("insufficient groups: {0}")]
    InsufficientGroups(String),

    /// An optional capability was not compiled in.
    #[error("optional dependency missing: {0}")]
    OptionalDependencyMissing(&'static str),
}
