use crate::analysis::stats::{mean, var_sample};
use crate::error::AnalysisError;
use crate::model::matrix::ScaleMatrix;
use crate::model::results::CorrelationMatrix;

/// Pairwise Pearson correlation over all items. The matrix is dense after
/// construction-time complete-case filtering, so every pair sees the same
/// rows.
pub fn correlation_matrix(matrix: &ScaleMatrix) -> Result<CorrelationMatrix, AnalysisError> {
    let k = matrix.n_items;
    let n = matrix.n_respondents;

    let columns: Vec<Vec<f64>> = (0..k).map(|item| matrix.item_column(item)).collect();
    let means: Vec<f64> = columns.iter().map(|c| mean(c)).collect();
    let vars: Vec<f64> = columns.iter().map(|c| var_sample(c)).collect();

    for (item, &v) in vars.iter().enumerate() {
        if v == 0.0 {
            return Err(AnalysisError::DegenerateInput(format!(
                "item '{}' has zero variance; correlation is undefined",
                matrix.item_labels[item]
            )));
        }
    }

    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in i + 1..k {
            let mut cov = 0.0;
            for r in 0..n {
                cov += (columns[i][r] - means[i]) * (columns[j][r] - means[j]);
            }
            cov /= (n - 1) as f64;
            let rho = cov / (vars[i] * vars[j]).sqrt();
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }

    Ok(CorrelationMatrix {
        labels: matrix.item_labels.clone(),
        values,
    })
}
