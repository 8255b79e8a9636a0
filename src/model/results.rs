use serde::Serialize;

use crate::error::AnalysisError;
use crate::model::bands::{ItemBand, ReliabilityBand, TotalBand};

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub label: String,
    pub mean: f64,
    /// 1-based position in descending-mean order.
    pub rank: usize,
    pub band: ItemBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityResult {
    pub alpha: f64,
    pub band: ReliabilityBand,
}

/// Symmetric item-by-item Pearson matrix, diagonal 1.0.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn n_items(&self) -> usize {
        self.labels.len()
    }
}

/// Per-respondent aggregate. Both conventions are carried by name: `mean`
/// feeds normality and group comparison, `sum` feeds the 0–100 banding.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TotalScore {
    pub mean: f64,
    pub sum: f64,
    pub band: TotalBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NormalityMethod {
    ShapiroWilk,
    KolmogorovSmirnov,
}

impl NormalityMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShapiroWilk => "Shapiro-Wilk",
            Self::KolmogorovSmirnov => "Kolmogorov-Smirnov",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NormalityResult {
    pub method: NormalityMethod,
    pub statistic: f64,
    pub p_value: f64,
    /// `p_value > alpha_level`.
    pub is_normal: bool,
}

/// One theoretical-vs-empirical quantile pair for QQ plotting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QqPoint {
    pub theoretical: f64,
    pub empirical: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionResult {
    pub totals: Vec<TotalScore>,
    pub skewness: f64,
    pub kurtosis: f64,
    pub normality: NormalityResult,
    pub qq: Vec<QqPoint>,
}

/// Pairwise adjusted p-values keyed by group-label order; diagonal 1.0.
#[derive(Debug, Clone, Serialize)]
pub struct PosthocMatrix {
    pub labels: Vec<String>,
    pub p_values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct GroupComparisonResult {
    pub group_labels: Vec<String>,
    pub group_sizes: Vec<usize>,
    /// Kruskal-Wallis H, tie-corrected.
    pub statistic: f64,
    pub p_value: f64,
    /// `None` when the omnibus test is not significant; `Some(Err(..))`
    /// when the post-hoc capability is not compiled in.
    pub posthoc: Option<Result<PosthocMatrix, AnalysisError>>,
}
