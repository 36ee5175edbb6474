//! Center line and control limit computation.
//!
//! # Formulas
//!
//! | Mode  | Center line | Limits |
//! |-------|-------------|--------|
//! | `run` | median      | none   |
//! | `xmr` | mean        | CL +/- 2.66 * MR-bar |
//! | `p`   | mean        | CL +/- 3 * sqrt(CL * (100 - CL) / n) |
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 6 (individuals charts) and Chapter 7 (p charts).
//! - Wheeler, D.J. (1995). *Advanced Topics in Statistical Process Control*.

use super::chart::{ChartMode, ControlLimits};
use crate::config::AnalyzerConfig;

/// Individuals chart factor: 3 / d2 with d2 = 1.128 for moving ranges of two.
pub const E2: f64 = 2.66;

/// Width of the `p` mode limits in binomial standard deviations.
pub const P_CHART_SIGMAS: f64 = 3.0;

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    u_numflow::stats::mean(values).unwrap_or(0.0)
}

/// Median by the middle-element convention.
///
/// Sorts ascending and takes the element at index `floor(n / 2)`. For an even
/// count this is the upper of the two middle values, not the lower-middle
/// value the run-chart convention is sometimes described with; no averaging
/// happens. Returns `0.0` for an empty slice.
pub fn median_center(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}

/// Absolute differences between consecutive values (`n - 1` ranges).
pub fn moving_ranges(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

/// Compute the center line and, where the mode has them, the control limits.
///
/// `values` must be non-empty and finite; the analyzer guarantees both.
pub fn center_and_limits(
    values: &[f64],
    mode: ChartMode,
    config: &AnalyzerConfig,
) -> (f64, Option<ControlLimits>) {
    match mode {
        ChartMode::Run => (median_center(values), None),
        ChartMode::Xmr => {
            let cl = mean(values);
            if values.len() < 2 {
                return (cl, None);
            }
            let mr_bar = mean(&moving_ranges(values));
            let limits = ControlLimits {
                ucl: cl + E2 * mr_bar,
                cl,
                lcl: cl - E2 * mr_bar,
            };
            (cl, Some(limits))
        }
        ChartMode::P => {
            let cl = mean(values);
            let n = f64::from(config.p_chart_subgroup_size);
            // Percentages outside 0..=100 would make the variance negative.
            let variance = (cl * (100.0 - cl)).max(0.0) / n;
            let sigma = variance.sqrt();
            let limits = ControlLimits {
                ucl: cl + P_CHART_SIGMAS * sigma,
                cl,
                lcl: cl - P_CHART_SIGMAS * sigma,
            };
            (cl, Some(limits))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median_center(&[5.0, 1.0, 3.0, 2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_median_even_takes_index_half() {
        // sorted [1, 2, 3, 4], index 2
        assert_eq!(median_center(&[4.0, 1.0, 3.0, 2.0]), 3.0);
        assert_eq!(median_center(&[7.0, 9.0]), 9.0);
    }

    #[test]
    fn test_median_single_and_empty() {
        assert_eq!(median_center(&[8.0]), 8.0);
        assert_eq!(median_center(&[]), 0.0);
    }

    #[test]
    fn test_moving_ranges() {
        assert_eq!(moving_ranges(&[1.0, 4.0, 2.0, 2.0]), vec![3.0, 2.0, 0.0]);
        assert!(moving_ranges(&[1.0]).is_empty());
    }

    #[test]
    fn test_run_mode_has_no_limits() {
        let (cl, limits) = center_and_limits(&[1.0, 2.0, 3.0, 4.0, 5.0], ChartMode::Run, &cfg());
        assert_eq!(cl, 3.0);
        assert!(limits.is_none());
    }

    #[test]
    fn test_xmr_constant_series_collapses_limits() {
        let (cl, limits) = center_and_limits(&[10.0; 4], ChartMode::Xmr, &cfg());
        let limits = limits.expect("xmr limits");
        assert!((cl - 10.0).abs() < f64::EPSILON);
        assert!((limits.ucl - 10.0).abs() < f64::EPSILON);
        assert!((limits.lcl - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_xmr_e2_factor() {
        // X-bar = 100, MR-bar = 10
        let (cl, limits) = center_and_limits(&[95.0, 105.0], ChartMode::Xmr, &cfg());
        let limits = limits.expect("xmr limits");
        assert!((cl - 100.0).abs() < 1e-12);
        assert!((limits.ucl - 126.6).abs() < 1e-9);
        assert!((limits.lcl - 73.4).abs() < 1e-9);
    }

    #[test]
    fn test_xmr_single_point_has_no_limits() {
        let (cl, limits) = center_and_limits(&[7.0], ChartMode::Xmr, &cfg());
        assert_eq!(cl, 7.0);
        assert!(limits.is_none());
    }

    #[test]
    fn test_xmr_mean_moving_range() {
        // MR = [2, 4, 4], MR-bar = 10/3, mean = 4.5
        let (cl, limits) = center_and_limits(&[2.0, 4.0, 8.0, 4.0], ChartMode::Xmr, &cfg());
        let limits = limits.expect("xmr limits");
        assert!((cl - 4.5).abs() < 1e-12);
        let mr_bar = (2.0 + 4.0 + 4.0) / 3.0;
        assert!((limits.ucl - (4.5 + 2.66 * mr_bar)).abs() < 1e-9);
        assert!((limits.lcl - (4.5 - 2.66 * mr_bar)).abs() < 1e-9);
    }

    #[test]
    fn test_p_chart_fifty_percent() {
        let (cl, limits) = center_and_limits(&[50.0; 10], ChartMode::P, &cfg());
        let limits = limits.expect("p limits");
        let sigma = (50.0_f64 * 50.0 / 20.0).sqrt();
        assert!((sigma - 11.18).abs() < 0.01);
        assert!((cl - 50.0).abs() < 1e-12);
        assert!((limits.ucl - 83.54).abs() < 0.01);
        assert!((limits.lcl - 16.46).abs() < 0.01);
    }

    #[test]
    fn test_p_chart_uses_configured_subgroup() {
        let config = AnalyzerConfig {
            p_chart_subgroup_size: 100,
            ..AnalyzerConfig::default()
        };
        let (_, limits) = center_and_limits(&[50.0; 3], ChartMode::P, &config);
        let limits = limits.expect("p limits");
        // sigma = sqrt(2500 / 100) = 5
        assert!((limits.ucl - 65.0).abs() < 1e-9);
        assert!((limits.lcl - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_p_chart_out_of_range_percentages_stay_finite() {
        let (cl, limits) = center_and_limits(&[150.0, 130.0], ChartMode::P, &cfg());
        let limits = limits.expect("p limits");
        assert!(limits.ucl.is_finite() && limits.lcl.is_finite());
        assert_eq!(limits.ucl, cl);
        assert_eq!(limits.lcl, cl);
    }
}
