use tracing::debug;

use crate::analysis::stats::var_sample;
use crate::error::AnalysisError;
use crate::model::bands::{ReliabilityBand, ReliabilityScheme};
use crate::model::matrix::ScaleMatrix;
use crate::model::results::ReliabilityResult;

/// Cronbach's alpha: `k/(k-1) * (1 - sum(item variances) / var(row sums))`,
/// variances Bessel-corrected. Invariant under item reordering.
pub fn cronbach_alpha(
    matrix: &ScaleMatrix,
    scheme: ReliabilityScheme,
) -> Result<ReliabilityResult, AnalysisError> {
    let k = matrix.n_items;
    if k < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "cronbach's alpha needs at least 2 items, got {k}"
        )));
    }

    let mut item_var_sum = 0.0;
    for item in 0..k {
        item_var_sum += var_sample(&matrix.item_column(item));
    }

    let row_sums: Vec<f64> = (0..matrix.n_respondents)
        .map(|r| matrix.row(r).iter().sum())
        .collect();
    let var_total = var_sample(&row_sums);
    if var_total == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "total-score variance is zero; alpha is undefined".to_string(),
        ));
    }

    let alpha = k as f64 / (k as f64 - 1.0) * (1.0 - item_var_sum / var_total);
    let band = ReliabilityBand::classify(alpha, scheme);
    debug!(alpha, band = band.label(), "computed cronbach's alpha");

    Ok(ReliabilityResult { alpha, band })
}
