use serde_json::{Value, json};

use crate::analysis::SurveyAnalysis;
use crate::model::options::AnalysisOptions;
use crate::report::{SurveySummary, item_export_rows};

/// Assembles the machine-readable report. The caller decides how (and
/// whether) to write it out.
pub fn summary_json(analysis: &SurveyAnalysis, options: &AnalysisOptions) -> Value {
    let summary = SurveySummary::from_analysis(analysis, options);

    let groups = match &analysis.groups {
        None => Value::Null,
        Some(Err(err)) => json!({ "error": err.to_string() }),
        Some(Ok(result)) => {
            let posthoc = match &result.posthoc {
                None => Value::Null,
                Some(Err(err)) => json!({ "error": err.to_string() }),
                Some(Ok(matrix)) => json!({
                    "labels": &matrix.labels,
                    "p_values": &matrix.p_values,
                }),
            };
            json!({
                "labels": &result.group_labels,
                "sizes": &result.group_sizes,
                "statistic": result.statistic,
                "p_value": result.p_value,
                "posthoc": posthoc,
            })
        }
    };

    json!({
        "tool": "likertqc",
        "version": env!("CARGO_PKG_VERSION"),
        "survey": {
            "n_respondents": summary.n_respondents,
            "n_items": summary.n_items,
        },
        "reliability": {
            "alpha": summary.alpha,
            "band": summary.alpha_band,
        },
        "items": &analysis.items,
        "export": item_export_rows(&analysis.items),
        "correlation": {
            "labels": &analysis.correlation.labels,
            "values": &analysis.correlation.values,
        },
        "distribution": {
            "skewness": summary.skewness,
            "kurtosis": summary.kurtosis,
            "normality": {
                "method": summary.normality_method,
                "statistic": summary.normality_statistic,
                "p_value": summary.normality_p,
                "is_normal": summary.is_normal,
            },
            "band_tally": summary.band_tally,
            "qq": &analysis.distribution.qq,
        },
        "groups": groups,
    })
}

pub fn render_summary_json(analysis: &SurveyAnalysis, options: &AnalysisOptions) -> String {
    summary_json(analysis, options).to_string()
}
