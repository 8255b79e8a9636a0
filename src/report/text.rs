use crate::report::{SurveySummary, format_f64_3};

pub fn render_report_text(summary: &SurveySummary) -> String {
    let mut out = String::new();

    out.push_str("Likert Survey Analysis Report\n");
    out.push_str("=============================\n\n");

    out.push_str("1. Survey overview\n");
    out.push_str(&format!("Respondents: {}\n", summary.n_respondents));
    out.push_str(&format!("Items: {}\n\n", summary.n_items));

    out.push_str("2. Reliability\n");
    out.push_str(&format!(
        "Cronbach's alpha: {} ({})\n\n",
        format_f64_3(summary.alpha),
        summary.alpha_band
    ));

    out.push_str("3. Item ranking\n");
    out.push_str(&format!(
        "Highest-rated: {}\n",
        joined_items(&summary.highest)
    ));
    out.push_str(&format!("Middle band: {}\n", joined_items(&summary.middle)));
    out.push_str(&format!(
        "Lowest-rated: {}\n\n",
        joined_items(&summary.lowest)
    ));

    out.push_str("4. Score distribution\n");
    out.push_str(&format!("Skewness: {}\n", format_f64_3(summary.skewness)));
    out.push_str(&format!(
        "Excess kurtosis: {}\n",
        format_f64_3(summary.kurtosis)
    ));
    out.push_str(&format!(
        "Normality ({}): statistic={}, p={}\n",
        summary.normality_method,
        format_f64_3(summary.normality_statistic),
        format_f64_3(summary.normality_p)
    ));
    out.push_str(&format!(
        "Conclusion: {}\n",
        normality_statement(summary.is_normal)
    ));
    for (band, count) in &summary.band_tally {
        out.push_str(&format!("{}: {}\n", band, count));
    }
    out.push('\n');

    out.push_str("5. Group comparison\n");
    match &summary.groups {
        None => out.push_str("Not run: no grouping column supplied.\n"),
        Some(digest) => {
            if let Some(note) = &digest.note {
                out.push_str(&format!("Note: {}\n", note));
            }
            if !digest.labels.is_empty() {
                out.push_str(&format!(
                    "Groups ({}): {}\n",
                    digest.labels.len(),
                    digest.labels.join(", ")
                ));
                out.push_str(&format!(
                    "Kruskal-Wallis H: {}, p={}\n",
                    format_f64_3(digest.statistic),
                    format_f64_3(digest.p_value)
                ));
                out.push_str(&format!(
                    "Conclusion: {}\n",
                    group_statement(digest.significant, digest.posthoc_pairs)
                ));
            }
        }
    }

    out
}

fn joined_items(items: &[(String, f64)]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|(label, mean)| format!("{} ({})", label, format_f64_3(*mean)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn normality_statement(is_normal: bool) -> &'static str {
    if is_normal {
        "total scores are consistent with a normal distribution (p > 0.05)"
    } else {
        "total scores deviate from a normal distribution (p <= 0.05)"
    }
}

fn group_statement(significant: bool, posthoc_pairs: usize) -> String {
    if !significant {
        return "no detectable location difference among groups".to_string();
    }
    if posthoc_pairs > 0 {
        format!(
            "groups differ; {} pairwise comparisons computed with Bonferroni adjustment",
            posthoc_pairs
        )
    } else {
        "groups differ; pairwise comparisons unavailable".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::model::matrix::ScaleMatrix;
    use crate::model::options::AnalysisOptions;

    fn summary_with_groups(groups: Option<Vec<Option<String>>>) -> SurveySummary {
        let rows = vec![
            vec![5.0, 4.0, 3.0],
            vec![4.0, 4.0, 2.0],
            vec![5.0, 3.0, 3.0],
            vec![2.0, 2.0, 1.0],
            vec![3.0, 4.0, 4.0],
            vec![1.0, 2.0, 2.0],
        ];
        let labels = vec!["Q1", "Q2", "Q3"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let matrix = ScaleMatrix::from_rows(labels, rows).unwrap();
        let options = AnalysisOptions::default_v1();
        let analysis = run_analysis(&matrix, groups.as_deref(), &options).unwrap();
        SurveySummary::from_analysis(&analysis, &options)
    }

    #[test]
    fn test_report_sections_present() {
        let text = render_report_text(&summary_with_groups(None));
        assert!(text.contains("1. Survey overview"));
        assert!(text.contains("2. Reliability"));
        assert!(text.contains("Cronbach's alpha:"));
        assert!(text.contains("3. Item ranking"));
        assert!(text.contains("4. Score distribution"));
        assert!(text.contains("5. Group comparison"));
        assert!(text.contains("Not run"));
    }

    #[test]
    fn test_report_surfaces_group_errors() {
        let groups = vec![
            Some("a".to_string()),
            Some("b".to_string()),
            Some("a".to_string()),
            None,
            None,
            None,
        ];
        let text = render_report_text(&summary_with_groups(Some(groups)));
        assert!(text.contains("insufficient groups"));
    }

    #[test]
    fn test_joined_items_formatting() {
        let items = vec![("Q1".to_string(), 4.5), ("Q2".to_string(), 3.25)];
        assert_eq!(joined_items(&items), "Q1 (4.500), Q2 (3.250)");
        assert_eq!(joined_items(&[]), "-");
    }
}
