use std::collections::HashSet;

use tracing::warn;

use crate::error::AnalysisError;
use crate::input::RawTable;

/// Validated, dense matrix of ordinal responses. Rows are respondents,
/// columns are items. Read-only after construction; every analyzer borrows
/// it immutably.
#[derive(Debug, Clone)]
pub struct ScaleMatrix {
    pub n_respondents: usize,
    pub n_items: usize,
    /// Row-major, `n_respondents x n_items`, all values finite.
    pub values: Vec<Vec<f64>>,
    /// Unique, order-significant item labels.
    pub item_labels: Vec<String>,
    /// Index of each retained row in the source table, so categorical
    /// columns can be aligned after complete-case filtering.
    pub source_rows: Vec<usize>,
}

impl ScaleMatrix {
    /// Builds a matrix from all table columns at `item_start_index` and
    /// onward. Rows with a blank item cell are dropped (complete-case
    /// policy, applied here once for every downstream analyzer); a
    /// non-blank cell that does not parse as a finite number is a schema
    /// error.
    pub fn build(table: &RawTable, item_start_index: usize) -> Result<Self, AnalysisError> {
        let n_columns = table.n_columns();
        if n_columns < item_start_index + 2 {
            return Err(AnalysisError::Schema(format!(
                "need at least 2 item columns from index {item_start_index}, table has {n_columns}"
            )));
        }

        let item_labels: Vec<String> = table.columns[item_start_index..].to_vec();
        let mut seen = HashSet::new();
        for label in &item_labels {
            if !seen.insert(label.as_str()) {
                return Err(AnalysisError::Schema(format!(
                    "duplicate item label: {label}"
                )));
            }
        }

        let n_items = item_labels.len();
        let mut values = Vec::with_capacity(table.n_rows());
        let mut source_rows = Vec::with_capacity(table.n_rows());
        let mut dropped = 0usize;

        'rows: for (row_idx, row) in table.rows.iter().enumerate() {
            if row.len() != n_columns {
                return Err(AnalysisError::Schema(format!(
                    "row {} has {} cells, expected {}",
                    row_idx,
                    row.len(),
                    n_columns
                )));
            }

            let mut parsed = Vec::with_capacity(n_items);
            for (item, cell) in row[item_start_index..].iter().enumerate() {
                let cell = cell.trim();
                if cell.is_empty() {
                    dropped += 1;
                    continue 'rows;
                }
                let value: f64 = cell.parse().map_err(|_| {
                    AnalysisError::Schema(format!(
                        "item column '{}' is not numeric at row {} (value '{}')",
                        item_labels[item], row_idx, cell
                    ))
                })?;
                if !value.is_finite() {
                    return Err(AnalysisError::Schema(format!(
                        "item column '{}' has non-finite value at row {}",
                        item_labels[item], row_idx
                    )));
                }
                parsed.push(value);
            }
            values.push(parsed);
            source_rows.push(row_idx);
        }

        if dropped > 0 {
            warn!(dropped, "dropped incomplete respondent rows");
        }
        if values.is_empty() {
            return Err(AnalysisError::Schema(
                "no complete respondent rows after filtering".to_string(),
            ));
        }

        Ok(Self {
            n_respondents: values.len(),
            n_items,
            values,
            item_labels,
            source_rows,
        })
    }

    /// Constructs a matrix directly from numeric rows, for callers that
    /// already hold a loaded data matrix.
    pub fn from_rows(item_labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, AnalysisError> {
        if item_labels.len() < 2 {
            return Err(AnalysisError::Schema(format!(
                "need at least 2 items, got {}",
                item_labels.len()
            )));
        }
        if rows.is_empty() {
            return Err(AnalysisError::Schema("need at least 1 respondent".to_string()));
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != item_labels.len() {
                return Err(AnalysisError::Schema(format!(
                    "row {} has {} values, expected {}",
                    row_idx,
                    row.len(),
                    item_labels.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(AnalysisError::Schema(format!(
                    "row {row_idx} has a non-finite value"
                )));
            }
        }

        let source_rows = (0..rows.len()).collect();
        Ok(Self {
            n_respondents: rows.len(),
            n_items: item_labels.len(),
            values: rows,
            item_labels,
            source_rows,
        })
    }

    pub fn row(&self, respondent: usize) -> &[f64] {
        &self.values[respondent]
    }

    /// Copies one item column out of the row-major storage.
    pub fn item_column(&self, item: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[item]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(rows: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        rows.into_iter()
            .map(|r| r.into_iter().map(str::to_string).collect())
            .collect()
    }

    fn header() -> Vec<String> {
        vec!["Timestamp", "Nama", "Q1", "Q2", "Q3"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_build_drops_first_columns() {
        let table = RawTable::new(
            header(),
            strings(vec![
                vec!["t1", "a", "1", "2", "3"],
                vec!["t2", "b", "4", "5", "3"],
            ]),
        );
        let matrix = ScaleMatrix::build(&table, 2).unwrap();
        assert_eq!(matrix.n_respondents, 2);
        assert_eq!(matrix.n_items, 3);
        assert_eq!(matrix.item_labels, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(matrix.row(1), &[4.0, 5.0, 3.0]);
        assert_eq!(matrix.item_column(0), vec![1.0, 4.0]);
    }

    #[test]
    fn test_build_complete_case_drops_blank_rows() {
        let table = RawTable::new(
            header(),
            strings(vec![
                vec!["t1", "a", "1", "2", "3"],
                vec!["t2", "b", "4", "", "3"],
                vec!["t3", "c", "2", "2", "2"],
            ]),
        );
        let matrix = ScaleMatrix::build(&table, 2).unwrap();
        assert_eq!(matrix.n_respondents, 2);
        assert_eq!(matrix.source_rows, vec![0, 2]);
    }

    #[test]
    fn test_build_rejects_few_item_columns() {
        let table = RawTable::new(
            vec!["Timestamp".to_string(), "Nama".to_string(), "Q1".to_string()],
            strings(vec![vec!["t1", "a", "1"]]),
        );
        let err = ScaleMatrix::build(&table, 2).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }

    #[test]
    fn test_build_rejects_non_numeric() {
        let table = RawTable::new(
            header(),
            strings(vec![vec!["t1", "a", "1", "x", "3"]]),
        );
        let err = ScaleMatrix::build(&table, 2).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
        assert!(err.to_string().contains("Q2"));
    }

    #[test]
    fn test_build_rejects_ragged_rows() {
        let table = RawTable::new(
            header(),
            strings(vec![vec!["t1", "a", "1", "2", "3"], vec!["t2", "b", "1"]]),
        );
        assert!(ScaleMatrix::build(&table, 2).is_err());
    }

    #[test]
    fn test_build_rejects_all_rows_incomplete() {
        let table = RawTable::new(
            header(),
            strings(vec![vec!["t1", "a", "", "2", "3"]]),
        );
        assert!(ScaleMatrix::build(&table, 2).is_err());
    }

    #[test]
    fn test_build_rejects_duplicate_labels() {
        let table = RawTable::new(
            vec!["Timestamp", "Nama", "Q1", "Q1"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            strings(vec![vec!["t1", "a", "1", "2"]]),
        );
        assert!(ScaleMatrix::build(&table, 2).is_err());
    }

    #[test]
    fn test_from_rows_validates_shape() {
        let labels: Vec<String> = vec!["Q1".to_string(), "Q2".to_string()];
        assert!(ScaleMatrix::from_rows(labels.clone(), vec![vec![1.0, 2.0]]).is_ok());
        assert!(ScaleMatrix::from_rows(labels.clone(), vec![vec![1.0]]).is_err());
        assert!(ScaleMatrix::from_rows(labels.clone(), vec![]).is_err());
        assert!(ScaleMatrix::from_rows(labels, vec![vec![1.0, f64::NAN]]).is_err());
    }
}
