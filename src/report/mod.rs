pub mod json;
pub mod text;

use serde::Serialize;

use crate::analysis::SurveyAnalysis;
use crate::analysis::distribution::band_counts;
use crate::analysis::items::{highest, lowest, middle_band};
use crate::model::options::AnalysisOptions;
use crate::model::results::ItemSummary;

/// One row of the flat item export: label, mean, interpretation. The
/// column names follow the original survey tooling this feeds.
#[derive(Debug, Clone, Serialize)]
pub struct ItemExportRow {
    #[serde(rename = "Pertanyaan")]
    pub item: String,
    #[serde(rename = "Rata-rata Skor")]
    pub mean_score: f64,
    #[serde(rename = "Interpretasi")]
    pub interpretation: &'static str,
}

pub fn item_export_rows(items: &[ItemSummary]) -> Vec<ItemExportRow> {
    items
        .iter()
        .map(|summary| ItemExportRow {
            item: summary.label.clone(),
            mean_score: summary.mean,
            interpretation: summary.band.label(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct GroupDigest {
    pub labels: Vec<String>,
    pub sizes: Vec<usize>,
    pub statistic: f64,
    pub p_value: f64,
    pub significant: bool,
    pub posthoc_pairs: usize,
    pub note: Option<String>,
}

/// Scalar digest of a full analysis, shared by the text and JSON
/// renderers.
#[derive(Debug, Clone)]
pub struct SurveySummary {
    pub n_respondents: usize,
    pub n_items: usize,
    pub alpha: f64,
    pub alpha_band: &'static str,
    pub highest: Vec<(String, f64)>,
    pub lowest: Vec<(String, f64)>,
    pub middle: Vec<(String, f64)>,
    pub skewness: f64,
    pub kurtosis: f64,
    pub normality_method: &'static str,
    pub normality_statistic: f64,
    pub normality_p: f64,
    pub is_normal: bool,
    pub band_tally: Vec<(&'static str, usize)>,
    pub groups: Option<GroupDigest>,
}

impl SurveySummary {
    pub fn from_analysis(analysis: &SurveyAnalysis, options: &AnalysisOptions) -> Self {
        let pick = |slice: &[ItemSummary]| {
            slice
                .iter()
                .map(|s| (s.label.clone(), s.mean))
                .collect::<Vec<_>>()
        };

        let groups = analysis.groups.as_ref().map(|outcome| match outcome {
            Ok(result) => GroupDigest {
                labels: result.group_labels.clone(),
                sizes: result.group_sizes.clone(),
                statistic: result.statistic,
                p_value: result.p_value,
                significant: result.p_value <= options.alpha_level,
                posthoc_pairs: match &result.posthoc {
                    Some(Ok(matrix)) => matrix.labels.len() * (matrix.labels.len() - 1) / 2,
                    _ => 0,
                },
                note: match &result.posthoc {
                    Some(Err(err)) => Some(err.to_string()),
                    _ => None,
                },
            },
            Err(err) => GroupDigest {
                labels: Vec::new(),
                sizes: Vec::new(),
                statistic: 0.0,
                p_value: 1.0,
                significant: false,
                posthoc_pairs: 0,
                note: Some(err.to_string()),
            },
        });

        Self {
            n_respondents: analysis.distribution.totals.len(),
            n_items: analysis.items.len(),
            alpha: analysis.reliability.alpha,
            alpha_band: analysis.reliability.band.label(),
            highest: pick(highest(&analysis.items, options.extremes_n)),
            lowest: pick(lowest(&analysis.items, options.extremes_n)),
            middle: pick(middle_band(&analysis.items)),
            skewness: analysis.distribution.skewness,
            kurtosis: analysis.distribution.kurtosis,
            normality_method: analysis.distribution.normality.method.label(),
            normality_statistic: analysis.distribution.normality.statistic,
            normality_p: analysis.distribution.normality.p_value,
            is_normal: analysis.distribution.normality.is_normal,
            band_tally: band_counts(&analysis.distribution.totals)
                .into_iter()
                .map(|(band, count)| (band.label(), count))
                .collect(),
            groups,
        }
    }
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::model::bands::ItemBand;
    use crate::model::matrix::ScaleMatrix;

    fn analysis() -> (SurveyAnalysis, AnalysisOptions) {
        let rows = vec![
            vec![5.0, 4.0, 3.0, 2.0],
            vec![4.0, 4.0, 2.0, 1.0],
            vec![5.0, 3.0, 3.0, 2.0],
            vec![4.0, 5.0, 2.0, 3.0],
            vec![3.0, 4.0, 4.0, 1.0],
        ];
        let labels = vec!["Q1", "Q2", "Q3", "Q4"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let matrix = ScaleMatrix::from_rows(labels, rows).unwrap();
        let options = AnalysisOptions::default_v1();
        let analysis = run_analysis(&matrix, None, &options).unwrap();
        (analysis, options)
    }

    #[test]
    fn test_export_rows_follow_item_order() {
        let (analysis, _) = analysis();
        let rows = item_export_rows(&analysis.items);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].item, analysis.items[0].label);
        assert!(rows[0].mean_score >= rows[3].mean_score);
    }

    #[test]
    fn test_export_row_column_renames() {
        let row = ItemExportRow {
            item: "Q1".to_string(),
            mean_score: 4.2,
            interpretation: ItemBand::VeryGood.label(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Pertanyaan"], "Q1");
        assert_eq!(json["Rata-rata Skor"], 4.2);
        assert_eq!(json["Interpretasi"], "Very Good");
    }

    #[test]
    fn test_summary_digest() {
        let (analysis, options) = analysis();
        let summary = SurveySummary::from_analysis(&analysis, &options);
        assert_eq!(summary.n_respondents, 5);
        assert_eq!(summary.n_items, 4);
        assert_eq!(summary.highest.len(), 3);
        assert_eq!(summary.lowest.len(), 3);
        // 4 items: positional slice [1, 2) of the sorted sequence
        assert_eq!(summary.middle.len(), 1);
        assert!(summary.groups.is_none());
        let total: usize = summary.band_tally.iter().map(|&(_, c)| c).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_format_f64_3() {
        assert_eq!(format_f64_3(0.12345), "0.123");
        assert_eq!(format_f64_3(1.0), "1.000");
    }
}
