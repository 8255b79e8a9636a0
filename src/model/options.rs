use crate::model::bands::{ItemScheme, ReliabilityScheme};

/// Tunable analysis policies. `default_v1` is the canonical profile; the
/// alternative schemes exist because the source material disagrees with
/// itself (see DESIGN.md).
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub item_scheme: ItemScheme,
    pub reliability_scheme: ReliabilityScheme,
    /// Window size for the highest/lowest item selections.
    pub extremes_n: usize,
    /// Largest sample size handled by Shapiro-Wilk; above it the
    /// one-sample Kolmogorov-Smirnov test takes over.
    pub shapiro_max_n: usize,
    /// Significance level for the normality decision and the omnibus test.
    pub alpha_level: f64,
}

impl AnalysisOptions {
    pub fn default_v1() -> Self {
        Self {
            item_scheme: ItemScheme::ContinuousMean,
            reliability_scheme: ReliabilityScheme::SixTier,
            extremes_n: 3,
            shapiro_max_n: 50,
            alpha_level: 0.05,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::default_v1()
    }
}
