use crate::analysis::normality::test_normality;
use crate::analysis::stats::{excess_kurtosis, skewness, sorted_copy, unit_normal};
use crate::error::AnalysisError;
use crate::model::bands::TotalBand;
use crate::model::matrix::ScaleMatrix;
use crate::model::options::AnalysisOptions;
use crate::model::results::{DistributionResult, QqPoint, TotalScore};
use statrs::distribution::ContinuousCDF;

/// Per-respondent totals. Both aggregation conventions are produced: the
/// row mean (consumed by the normality test and the group comparison) and
/// the row sum (consumed by the 0–100 band cut points).
pub fn total_scores(matrix: &ScaleMatrix) -> Vec<TotalScore> {
    (0..matrix.n_respondents)
        .map(|r| {
            let row = matrix.row(r);
            let sum: f64 = row.iter().sum();
            let mean = sum / matrix.n_items as f64;
            TotalScore {
                mean,
                sum,
                band: TotalBand::classify(sum),
            }
        })
        .collect()
}

/// Standard-normal theoretical quantiles at Hazen positions `(i - 0.5)/n`
/// paired with the sorted sample, for external QQ plotting.
pub fn qq_points(xs: &[f64]) -> Vec<QqPoint> {
    let sorted = sorted_copy(xs);
    let n = sorted.len() as f64;
    let norm = unit_normal();
    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| QqPoint {
            theoretical: norm.inverse_cdf((i as f64 + 0.5) / n),
            empirical: x,
        })
        .collect()
}

/// Total-score distribution: totals, shape moments, the selected normality
/// test on the mean totals, and QQ coordinates.
pub fn analyze_distribution(
    matrix: &ScaleMatrix,
    options: &AnalysisOptions,
) -> Result<DistributionResult, AnalysisError> {
    let totals = total_scores(matrix);
    let means: Vec<f64> = totals.iter().map(|t| t.mean).collect();

    let normality = test_normality(&means, options)?;

    Ok(DistributionResult {
        skewness: skewness(&means),
        kurtosis: excess_kurtosis(&means),
        qq: qq_points(&means),
        totals,
        normality,
    })
}

/// Respondent counts per sum-based band, in band order.
pub fn band_counts(totals: &[TotalScore]) -> Vec<(TotalBand, usize)> {
    TotalBand::ALL
        .iter()
        .map(|&band| (band, totals.iter().filter(|t| t.band == band).count()))
        .collect()
}
