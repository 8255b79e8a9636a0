use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::analysis::stats::{mean, sorted_copy, std_sample, unit_normal};
use crate::error::AnalysisError;
use crate::model::options::AnalysisOptions;
use crate::model::results::{NormalityMethod, NormalityResult};

/// Runs the sample-size-selected normality test: Shapiro-Wilk up to
/// `shapiro_max_n` observations, one-sample Kolmogorov-Smirnov beyond.
/// Normal iff `p_value > alpha_level`.
pub fn test_normality(
    xs: &[f64],
    options: &AnalysisOptions,
) -> Result<NormalityResult, AnalysisError> {
    let (method, statistic, p_value) = if xs.len() <= options.shapiro_max_n {
        let (w, p) = shapiro_wilk(xs)?;
        (NormalityMethod::ShapiroWilk, w, p)
    } else {
        let (d, p) = kolmogorov_smirnov(xs)?;
        (NormalityMethod::KolmogorovSmirnov, d, p)
    };
    debug!(
        method = method.label(),
        n = xs.len(),
        statistic,
        p_value,
        "normality test"
    );
    Ok(NormalityResult {
        method,
        statistic,
        p_value,
        is_normal: p_value > options.alpha_level,
    })
}

/// Shapiro-Wilk W and its p-value, following Royston's AS R94
/// approximation. Valid for 3 <= n <= 5000.
pub fn shapiro_wilk(xs: &[f64]) -> Result<(f64, f64), AnalysisError> {
    let n = xs.len();
    if n < 3 {
        return Err(AnalysisError::DegenerateInput(format!(
            "shapiro-wilk needs at least 3 observations, got {n}"
        )));
    }
    if n > 5000 {
        return Err(AnalysisError::DegenerateInput(format!(
            "shapiro-wilk approximation is unreliable beyond 5000 observations, got {n}"
        )));
    }

    let sorted = sorted_copy(xs);
    if sorted[n - 1] - sorted[0] == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "sample range is zero; normality is undefined".to_string(),
        ));
    }

    let nn = n as f64;
    let norm = unit_normal();

    // expected normal order statistics, Blom-style plotting positions
    let m: Vec<f64> = (1..=n)
        .map(|i| norm.inverse_cdf((i as f64 - 0.375) / (nn + 0.25)))
        .collect();
    let ssm: f64 = m.iter().map(|v| v * v).sum();

    let rsn = 1.0 / nn.sqrt();
    let a_n = -2.706056 * rsn.powi(5) + 4.434685 * rsn.powi(4) - 2.071190 * rsn.powi(3)
        - 0.147981 * rsn.powi(2)
        + 0.221157 * rsn
        + m[n - 1] / ssm.sqrt();

    let mut a = vec![0.0; n];
    if n > 5 {
        let a_n1 = -3.582633 * rsn.powi(5) + 5.682633 * rsn.powi(4) - 1.752461 * rsn.powi(3)
            - 0.293762 * rsn.powi(2)
            + 0.042981 * rsn
            + m[n - 2] / ssm.sqrt();
        let phi = (ssm - 2.0 * m[n - 1] * m[n - 1] - 2.0 * m[n - 2] * m[n - 2])
            / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
        a[n - 1] = a_n;
        a[0] = -a_n;
        a[n - 2] = a_n1;
        a[1] = -a_n1;
        for i in 2..n - 2 {
            a[i] = m[i] / phi.sqrt();
        }
    } else if n == 3 {
        // exact weight; the fitted path is 0/0 at n = 3
        a[2] = std::f64::consts::FRAC_1_SQRT_2;
        a[0] = -a[2];
    } else {
        let phi = (ssm - 2.0 * m[n - 1] * m[n - 1]) / (1.0 - 2.0 * a_n * a_n);
        a[n - 1] = a_n;
        a[0] = -a_n;
        for i in 1..n - 1 {
            a[i] = m[i] / phi.sqrt();
        }
    }

    let xbar = mean(&sorted);
    let mut num = 0.0;
    let mut den = 0.0;
    for i in 0..n {
        num += a[i] * sorted[i];
        let d = sorted[i] - xbar;
        den += d * d;
    }
    let w = (num * num / den).min(1.0);

    let p = shapiro_p_value(w, n);
    Ok((w, p.clamp(0.0, 1.0)))
}

/// Royston's normalizing transforms of W to a one-sided normal p-value.
fn shapiro_p_value(w: f64, n: usize) -> f64 {
    let nn = n as f64;
    let norm = unit_normal();
    // keep the log argument positive when W rounds to 1
    let one_minus_w = (1.0 - w).max(1e-15);

    if n == 3 {
        let p = 6.0 / std::f64::consts::PI
            * (w.sqrt().asin() - (0.75f64).sqrt().asin());
        return p;
    }

    if n <= 11 {
        let gamma = -2.273 + 0.459 * nn;
        let arg = gamma - one_minus_w.ln();
        if arg <= 0.0 {
            // far outside the fitted range, W is tiny
            return 0.0;
        }
        let wt = -arg.ln();
        let mu = 0.5440 - 0.39978 * nn + 0.025054 * nn * nn - 0.0006714 * nn * nn * nn;
        let sigma = (1.3822 - 0.77857 * nn + 0.062767 * nn * nn - 0.0020322 * nn * nn * nn).exp();
        let z = (wt - mu) / sigma;
        return 1.0 - norm.cdf(z);
    }

    let lw = one_minus_w.ln();
    let ln_n = nn.ln();
    let mu = -1.5861 - 0.31082 * ln_n - 0.083751 * ln_n * ln_n + 0.0038915 * ln_n * ln_n * ln_n;
    let sigma = (-0.4803 - 0.082676 * ln_n + 0.0030302 * ln_n * ln_n).exp();
    let z = (lw - mu) / sigma;
    1.0 - norm.cdf(z)
}

/// One-sample Kolmogorov-Smirnov D against a normal distribution fitted to
/// the sample's own mean and standard deviation, with the asymptotic
/// p-value (Stephens' small-sample correction on lambda).
pub fn kolmogorov_smirnov(xs: &[f64]) -> Result<(f64, f64), AnalysisError> {
    let n = xs.len();
    if n < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "kolmogorov-smirnov needs at least 2 observations, got {n}"
        )));
    }
    let m = mean(xs);
    let s = std_sample(xs);
    if s == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "sample standard deviation is zero; normality is undefined".to_string(),
        ));
    }
    let dist = Normal::new(m, s).map_err(|_| {
        AnalysisError::DegenerateInput("invalid normal parameters for ks test".to_string())
    })?;

    let sorted = sorted_copy(xs);
    let nn = n as f64;
    let mut d = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = dist.cdf(x);
        let d_plus = (i + 1) as f64 / nn - cdf;
        let d_minus = cdf - i as f64 / nn;
        d = d.max(d_plus).max(d_minus);
    }

    let sqrt_n = nn.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    Ok((d, kolmogorov_q(lambda)))
}

/// Asymptotic Kolmogorov survival function `Q(lambda)`.
fn kolmogorov_q(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=100 {
        let jj = j as f64;
        let term = (-2.0 * jj * jj * lambda * lambda).exp();
        sum += sign * term;
        if term < 1e-12 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Perfectly normal-looking sample: the expected normal order
    /// statistics themselves.
    fn normal_scores(n: usize) -> Vec<f64> {
        let norm = unit_normal();
        (1..=n)
            .map(|i| norm.inverse_cdf((i as f64 - 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn test_shapiro_accepts_normal_scores() {
        let xs = normal_scores(20);
        let (w, p) = shapiro_wilk(&xs).unwrap();
        assert!(w > 0.98, "w={w}");
        assert!(p > 0.5, "p={p}");
    }

    #[test]
    fn test_shapiro_rejects_bimodal_sample() {
        let mut xs = vec![1.0; 10];
        xs.extend(vec![5.0; 10]);
        let (w, p) = shapiro_wilk(&xs).unwrap();
        assert!(w < 0.8, "w={w}");
        assert!(p < 0.05, "p={p}");
    }

    #[test]
    fn test_shapiro_statistic_in_unit_interval() {
        let xs = [2.0, 4.0, 1.0, 5.0, 3.0, 2.0, 4.0, 3.0];
        let (w, p) = shapiro_wilk(&xs).unwrap();
        assert!(w > 0.0 && w <= 1.0);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_shapiro_n3_equally_spaced_is_plausibly_normal() {
        let (w, p) = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert!(w > 0.99);
        assert!(p > 0.5);
    }

    #[test]
    fn test_shapiro_domain_guards() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_err());
        assert!(shapiro_wilk(&[3.0, 3.0, 3.0, 3.0]).is_err());
    }

    #[test]
    fn test_ks_bounds_and_determinism() {
        let xs: Vec<f64> = (0..60).map(|i| i as f64).collect();
        let (d, p) = kolmogorov_smirnov(&xs).unwrap();
        assert!(d > 0.0 && d < 1.0);
        assert!((0.0..=1.0).contains(&p));
        let (d2, p2) = kolmogorov_smirnov(&xs).unwrap();
        assert_eq!(d.to_bits(), d2.to_bits());
        assert_eq!(p.to_bits(), p2.to_bits());
    }

    #[test]
    fn test_ks_rejects_exponential_growth() {
        let xs: Vec<f64> = (0..60).map(|i| 1.1f64.powi(i)).collect();
        let (_, p) = kolmogorov_smirnov(&xs).unwrap();
        assert!(p < 0.05, "p={p}");
    }

    #[test]
    fn test_ks_zero_spread_is_explicit_error() {
        let xs = vec![2.0; 60];
        assert!(kolmogorov_smirnov(&xs).is_err());
    }

    #[test]
    fn test_method_selection_boundary() {
        let options = AnalysisOptions::default_v1();
        let at_cutoff = test_normality(&normal_scores(50), &options).unwrap();
        assert_eq!(at_cutoff.method, NormalityMethod::ShapiroWilk);
        let past_cutoff = test_normality(&normal_scores(51), &options).unwrap();
        assert_eq!(past_cutoff.method, NormalityMethod::KolmogorovSmirnov);
    }

    #[test]
    fn test_is_normal_follows_p_threshold() {
        let options = AnalysisOptions::default_v1();
        let good = test_normality(&normal_scores(30), &options).unwrap();
        assert!(good.is_normal);
        let mut bimodal = vec![1.0; 15];
        bimodal.extend(vec![5.0; 15]);
        let bad = test_normality(&bimodal, &options).unwrap();
        assert!(!bad.is_normal);
    }

    #[test]
    fn test_kolmogorov_q_tails() {
        assert!((kolmogorov_q(0.0) - 1.0).abs() < 1e-12);
        assert!(kolmogorov_q(3.0) < 1e-6);
        // known value: Q(1.0) ~= 0.2700
        assert!((kolmogorov_q(1.0) - 0.27).abs() < 0.005);
    }
}
