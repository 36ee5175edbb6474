//! The SPC analyzer: center line, limits, runs-rule classification and a
//! narrative summary for a measurement series.
//!
//! # Algorithm
//!
//! 1. Copy the input and sort it by date (stable).
//! 2. Collect the finite values; value-less points stay in the output as
//!    annotations but take no part in the statistics.
//! 3. Compute the center line and limits for the chart mode.
//! 4. Classify the values with the runs rule.
//! 5. Build the narrative from the rounded center line and whether any
//!    special-cause point was found.
//!
//! An empty numeric series is not an error: it yields a zero center line, no
//! limits, no classifications and the narrative `"No data yet."`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chart::{ChartMode, ControlLimits, PointClass};
use super::limits::center_and_limits;
use super::rules::classify_runs;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::series::{parse_series, sorted_chronologically, MeasurementPoint, RawMeasurement};

/// Narrative used when the series has no numeric values.
pub const NO_DATA_NARRATIVE: &str = "No data yet.";

/// A measurement as it appears in an analysis, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedPoint {
    #[serde(flatten)]
    pub point: MeasurementPoint,
    /// `None` for annotation points without a value.
    pub classification: Option<PointClass>,
}

/// Result of analyzing a series. Recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub mode: ChartMode,
    /// Center line (median for `run`, mean otherwise).
    pub center: f64,
    pub upper_limit: Option<f64>,
    pub lower_limit: Option<f64>,
    /// One class per numeric point, in chronological order.
    pub point_classification: Vec<PointClass>,
    /// Every input point, sorted, annotations included.
    pub points: Vec<AnalyzedPoint>,
    pub narrative: String,
}

impl AnalysisResult {
    fn empty(mode: ChartMode, points: Vec<AnalyzedPoint>) -> Self {
        Self {
            mode,
            center: 0.0,
            upper_limit: None,
            lower_limit: None,
            point_classification: Vec::new(),
            points,
            narrative: NO_DATA_NARRATIVE.to_string(),
        }
    }

    /// Whether any point was classified as special-cause variation.
    pub fn has_special_cause(&self) -> bool {
        self.point_classification.iter().any(|c| c.is_special())
    }

    /// The control limits, when the mode and data produced them.
    pub fn limits(&self) -> Option<ControlLimits> {
        match (self.upper_limit, self.lower_limit) {
            (Some(ucl), Some(lcl)) => Some(ControlLimits {
                ucl,
                cl: self.center,
                lcl,
            }),
            _ => None,
        }
    }

    /// Number of points that carry a numeric value.
    pub fn numeric_len(&self) -> usize {
        self.point_classification.len()
    }
}

/// Stateless SPC analyzer.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use qip_analytics::{ChartMode, MeasurementPoint, SpcAnalyzer};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let points: Vec<MeasurementPoint> = [12.0, 15.0, 11.0, 14.0, 13.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &v)| MeasurementPoint::new(start + chrono::Days::new(i as u64 * 7), v, "outcome"))
///     .collect();
///
/// let result = SpcAnalyzer::new().analyze(&points, ChartMode::Xmr);
/// let limits = result.limits().expect("xmr limits with 2+ points");
/// assert!(limits.lcl <= limits.cl && limits.cl <= limits.ucl);
/// assert!(!result.has_special_cause());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpcAnalyzer {
    config: AnalyzerConfig,
}

impl SpcAnalyzer {
    /// Analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with a validated custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this analyzer applies.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a series. The input is not mutated and need not be sorted.
    pub fn analyze(&self, points: &[MeasurementPoint], mode: ChartMode) -> AnalysisResult {
        let sorted = sorted_chronologically(points);
        let values: Vec<f64> = sorted.iter().filter_map(|p| p.numeric_value()).collect();

        if values.is_empty() {
            debug!(%mode, points = sorted.len(), "no numeric values to analyze");
            let annotated = sorted
                .into_iter()
                .map(|point| AnalyzedPoint {
                    point,
                    classification: None,
                })
                .collect();
            return AnalysisResult::empty(mode, annotated);
        }

        let (center, limits) = center_and_limits(&values, mode, &self.config);
        let classes = classify_runs(&values, center, self.config.run_length);

        let mut next_class = classes.iter().copied();
        let annotated: Vec<AnalyzedPoint> = sorted
            .into_iter()
            .map(|point| {
                let classification = point.numeric_value().and_then(|_| next_class.next());
                AnalyzedPoint {
                    point,
                    classification,
                }
            })
            .collect();

        let special = classes.iter().any(|c| c.is_special());
        debug!(
            %mode,
            points = annotated.len(),
            numeric = values.len(),
            center,
            special,
            "analyzed measurement series"
        );

        AnalysisResult {
            mode,
            center,
            upper_limit: limits.map(|l| l.ucl),
            lower_limit: limits.map(|l| l.lcl),
            point_classification: classes,
            points: annotated,
            narrative: narrative(center, special, self.config.run_length),
        }
    }

    /// Parse untyped rows and analyze them.
    pub fn analyze_raw(&self, rows: &[RawMeasurement], mode: ChartMode) -> AnalysisResult {
        self.analyze(&parse_series(rows), mode)
    }
}

/// Analyze a series with the default configuration.
pub fn analyze(points: &[MeasurementPoint], mode: ChartMode) -> AnalysisResult {
    SpcAnalyzer::new().analyze(points, mode)
}

/// Parse untyped rows and analyze them with the default configuration.
pub fn analyze_raw(rows: &[RawMeasurement], mode: ChartMode) -> AnalysisResult {
    SpcAnalyzer::new().analyze_raw(rows, mode)
}

/// Summary sentence for a non-empty series.
pub fn narrative(center: f64, special_cause: bool, run_length: usize) -> String {
    if special_cause {
        format!(
            "Center line at {center:.1}. Special Cause Variation detected \
             ({run_length}+ points in a run on one side of the center line)."
        )
    } else {
        format!("Center line at {center:.1}. Common Cause Variation only.")
    }
}
