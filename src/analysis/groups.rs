use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, warn};

use crate::analysis::stats::{rank_avg, tie_term};
use crate::error::AnalysisError;
use crate::model::options::AnalysisOptions;
use crate::model::results::{GroupComparisonResult, PosthocMatrix, TotalScore};

#[cfg(feature = "posthoc")]
use crate::analysis::stats::unit_normal;

/// Compares total scores across a categorical grouping column:
/// Kruskal-Wallis omnibus, then Dunn pairwise comparisons with Bonferroni
/// adjustment when the omnibus is significant. Respondents with a missing
/// group label are excluded (complete-case policy).
pub fn compare(
    totals: &[TotalScore],
    groups: &[Option<String>],
    options: &AnalysisOptions,
) -> Result<GroupComparisonResult, AnalysisError> {
    if totals.len() != groups.len() {
        return Err(AnalysisError::Schema(format!(
            "group column has {} entries for {} total scores",
            groups.len(),
            totals.len()
        )));
    }

    let mut by_group: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut dropped = 0usize;
    for (total, group) in totals.iter().zip(groups) {
        match group {
            Some(label) => by_group.entry(label.as_str()).or_default().push(total.mean),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, "excluded respondents without a group label");
    }

    if by_group.len() < 3 {
        return Err(AnalysisError::InsufficientGroups(format!(
            "omnibus test needs at least 3 groups, found {}",
            by_group.len()
        )));
    }

    let group_labels: Vec<String> = by_group.keys().map(|s| s.to_string()).collect();
    let samples: Vec<&[f64]> = by_group.values().map(|v| v.as_slice()).collect();
    let group_sizes: Vec<usize> = samples.iter().map(|s| s.len()).collect();

    let (statistic, p_value) = kruskal_wallis(&samples)?;
    debug!(
        groups = group_labels.len(),
        statistic, p_value, "kruskal-wallis omnibus"
    );

    let posthoc = if p_value <= options.alpha_level {
        Some(dunn_posthoc(&group_labels, &samples))
    } else {
        None
    };

    Ok(GroupComparisonResult {
        group_labels,
        group_sizes,
        statistic,
        p_value,
        posthoc,
    })
}

/// Kruskal-Wallis H over pooled average ranks, with the tie correction,
/// p-value from chi-squared with `k - 1` degrees of freedom.
pub fn kruskal_wallis(samples: &[&[f64]]) -> Result<(f64, f64), AnalysisError> {
    let k = samples.len();
    if k < 2 {
        return Err(AnalysisError::InsufficientGroups(format!(
            "kruskal-wallis needs at least 2 groups, got {k}"
        )));
    }

    let pooled: Vec<f64> = samples.iter().flat_map(|s| s.iter().copied()).collect();
    let n = pooled.len() as f64;
    let ranks = rank_avg(&pooled);

    let mut h = 0.0;
    let mut offset = 0usize;
    for sample in samples {
        let len = sample.len();
        let rank_sum: f64 = ranks[offset..offset + len].iter().sum();
        h += rank_sum * rank_sum / len as f64;
        offset += len;
    }
    let mut h = 12.0 / (n * (n + 1.0)) * h - 3.0 * (n + 1.0);

    let correction = 1.0 - tie_term(&pooled) / (n * n * n - n);
    if correction == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "all pooled scores are identical; rank test is undefined".to_string(),
        ));
    }
    h /= correction;

    let chi = ChiSquared::new((k - 1) as f64).map_err(|_| {
        AnalysisError::DegenerateInput("invalid degrees of freedom for chi-squared".to_string())
    })?;
    let p = (1.0 - chi.cdf(h)).clamp(0.0, 1.0);
    Ok((h, p))
}

/// Dunn's pairwise z tests on the pooled average ranks, tie-corrected
/// pooled variance, Bonferroni-adjusted p-values. Symmetric matrix keyed
/// by group-label order, diagonal 1.0.
#[cfg(feature = "posthoc")]
fn dunn_posthoc(labels: &[String], samples: &[&[f64]]) -> Result<PosthocMatrix, AnalysisError> {
    let k = samples.len();
    let pooled: Vec<f64> = samples.iter().flat_map(|s| s.iter().copied()).collect();
    let n = pooled.len() as f64;
    let ranks = rank_avg(&pooled);

    let mut mean_ranks = Vec::with_capacity(k);
    let mut offset = 0usize;
    for sample in samples {
        let len = sample.len();
        let rank_sum: f64 = ranks[offset..offset + len].iter().sum();
        mean_ranks.push(rank_sum / len as f64);
        offset += len;
    }

    let var_base = n * (n + 1.0) / 12.0 - tie_term(&pooled) / (12.0 * (n - 1.0));
    if var_base <= 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "pooled rank variance is zero; posthoc comparisons are undefined".to_string(),
        ));
    }

    let norm = unit_normal();
    let n_pairs = (k * (k - 1) / 2) as f64;
    let mut p_values = vec![vec![1.0; k]; k];
    for i in 0..k {
        for j in i + 1..k {
            let se = (var_base * (1.0 / samples[i].len() as f64 + 1.0 / samples[j].len() as f64))
                .sqrt();
            let z = (mean_ranks[i] - mean_ranks[j]).abs() / se;
            let p = 2.0 * (1.0 - norm.cdf(z));
            let adjusted = (p * n_pairs).min(1.0);
            p_values[i][j] = adjusted;
            p_values[j][i] = adjusted;
        }
    }

    Ok(PosthocMatrix {
        labels: labels.to_vec(),
        p_values,
    })
}

#[cfg(not(feature = "posthoc"))]
fn dunn_posthoc(_labels: &[String], _samples: &[&[f64]]) -> Result<PosthocMatrix, AnalysisError> {
    Err(AnalysisError::OptionalDependencyMissing("posthoc"))
}
