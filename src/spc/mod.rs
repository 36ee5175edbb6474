//! Statistical Process Control (SPC) analysis of a measurement series.
//!
//! # Chart Modes
//!
//! - [`ChartMode::Run`] — run chart, median center line, no limits
//! - [`ChartMode::Xmr`] — individuals / moving-range chart
//! - [`ChartMode::P`] — proportion chart for percentages with an assumed subgroup size
//!
//! # Special-Cause Detection
//!
//! - [`classify_runs`] — 6+ consecutive points on one side of the center line
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Provost, L.P. & Murray, S.K. (2011). *The Health Care Data Guide*.

mod analyzer;
mod chart;
mod limits;
mod rules;

pub use analyzer::{
    analyze, analyze_raw, narrative, AnalysisResult, AnalyzedPoint, SpcAnalyzer,
    NO_DATA_NARRATIVE,
};
pub use chart::{ChartMode, ControlLimits, PointClass};
pub use limits::{center_and_limits, mean, median_center, moving_ranges, E2, P_CHART_SIGMAS};
pub use rules::classify_runs;
