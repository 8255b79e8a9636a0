pub mod correlation;
pub mod distribution;
pub mod groups;
pub mod items;
pub mod normality;
pub mod reliability;
pub mod stats;

use tracing::info;

use crate::error::AnalysisError;
use crate::model::matrix::ScaleMatrix;
use crate::model::options::AnalysisOptions;
use crate::model::results::{
    CorrelationMatrix, DistributionResult, GroupComparisonResult, ItemSummary, ReliabilityResult,
};

/// Output of one full analysis pass. The group comparison is attached as a
/// result field so a missing or degenerate grouping column does not void
/// the rest of the analysis.
#[derive(Debug, Clone)]
pub struct SurveyAnalysis {
    pub reliability: ReliabilityResult,
    pub items: Vec<ItemSummary>,
    pub correlation: CorrelationMatrix,
    pub distribution: DistributionResult,
    pub groups: Option<Result<GroupComparisonResult, AnalysisError>>,
}

/// Runs every analyzer over the matrix. The first four are independent;
/// the group comparison consumes the distribution's total scores and is
/// sequenced after it, with the hand-off made explicit here rather than
/// through shared state.
pub fn run_analysis(
    matrix: &ScaleMatrix,
    group_column: Option<&[Option<String>]>,
    options: &AnalysisOptions,
) -> Result<SurveyAnalysis, AnalysisError> {
    info!(
        n_respondents = matrix.n_respondents,
        n_items = matrix.n_items,
        "running survey analysis"
    );

    let reliability = reliability::cronbach_alpha(matrix, options.reliability_scheme)?;
    let items = items::summarize(matrix, options.item_scheme);
    let correlation = correlation::correlation_matrix(matrix)?;
    let distribution = distribution::analyze_distribution(matrix, options)?;

    let groups =
        group_column.map(|column| groups::compare(&distribution.totals, column, options));

    Ok(SurveyAnalysis {
        reliability,
        items,
        correlation,
        distribution,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::results::NormalityMethod;

    fn matrix(rows: Vec<Vec<f64>>) -> ScaleMatrix {
        let labels = (0..rows[0].len()).map(|i| format!("Q{}", i + 1)).collect();
        ScaleMatrix::from_rows(labels, rows).unwrap()
    }

    #[test]
    fn test_end_to_end_identical_items() {
        let m = matrix(vec![
            vec![5.0, 5.0, 5.0],
            vec![1.0, 1.0, 1.0],
            vec![3.0, 3.0, 3.0],
            vec![4.0, 4.0, 4.0],
            vec![2.0, 2.0, 2.0],
        ]);
        let analysis = run_analysis(&m, None, &AnalysisOptions::default_v1()).unwrap();
        assert_eq!(analysis.reliability.alpha, 1.0);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(analysis.correlation.get(i, j), 1.0);
            }
        }
        assert_eq!(analysis.items.len(), 3);
        assert_eq!(analysis.distribution.totals.len(), 5);
        assert_eq!(
            analysis.distribution.normality.method,
            NormalityMethod::ShapiroWilk
        );
        assert!(analysis.groups.is_none());
    }

    #[test]
    fn test_group_errors_do_not_void_analysis() {
        let m = matrix(vec![
            vec![5.0, 4.0, 3.0],
            vec![1.0, 2.0, 3.0],
            vec![3.0, 3.0, 4.0],
            vec![4.0, 5.0, 2.0],
        ]);
        let groups = vec![Some("a".to_string()), Some("b".to_string()), None, None];
        let analysis =
            run_analysis(&m, Some(groups.as_slice()), &AnalysisOptions::default_v1()).unwrap();
        assert!(matches!(
            analysis.groups,
            Some(Err(AnalysisError::InsufficientGroups(_)))
        ));
        assert_eq!(analysis.items.len(), 3);
    }

    #[test]
    fn test_determinism_across_runs() {
        let m = matrix(vec![
            vec![5.0, 3.0, 4.0],
            vec![4.0, 2.0, 5.0],
            vec![3.0, 4.0, 3.0],
            vec![2.0, 1.0, 2.0],
            vec![5.0, 4.0, 4.0],
        ]);
        let options = AnalysisOptions::default_v1();
        let a = run_analysis(&m, None, &options).unwrap();
        let b = run_analysis(&m, None, &options).unwrap();
        assert_eq!(a.reliability.alpha.to_bits(), b.reliability.alpha.to_bits());
        assert_eq!(
            a.distribution.normality.p_value.to_bits(),
            b.distribution.normality.p_value.to_bits()
        );
        assert_eq!(
            a.distribution.skewness.to_bits(),
            b.distribution.skewness.to_bits()
        );
    }
}
