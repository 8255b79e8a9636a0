use tracing::warn;

use crate::error::AnalysisError;
use crate::model::matrix::ScaleMatrix;

/// Rectangular table handed over by the caller's I/O layer. Cells are
/// untyped strings; numeric coercion happens in [`ScaleMatrix::build`].
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let lower = name.to_ascii_lowercase();
        self.columns
            .iter()
            .position(|c| c.to_ascii_lowercase() == lower)
    }
}

/// Extracts a categorical column aligned with the rows the matrix retained.
/// Blank cells become `None`; the group comparison drops those respondents
/// (complete-case policy).
pub fn group_labels(
    table: &RawTable,
    column: usize,
    matrix: &ScaleMatrix,
) -> Result<Vec<Option<String>>, AnalysisError> {
    if column >= table.columns.len() {
        return Err(AnalysisError::Schema(format!(
            "group column index {} out of range ({} columns)",
            column,
            table.columns.len()
        )));
    }

    let mut out = Vec::with_capacity(matrix.source_rows.len());
    let mut missing = 0usize;
    for &row_idx in &matrix.source_rows {
        let cell = table
            .rows
            .get(row_idx)
            .and_then(|row| row.get(column))
            .map(|s| s.trim())
            .unwrap_or("");
        if cell.is_empty() {
            missing += 1;
            out.push(None);
        } else {
            out.push(Some(cell.to_string()));
        }
    }

    if missing > 0 {
        warn!(
            column = table.columns[column].as_str(),
            missing, "group column has blank cells; those respondents are excluded"
        );
    }

    Ok(out)
}
