//! Core chart vocabulary: chart modes, control limits and point classes.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Provost, L.P. & Murray, S.K. (2011). *The Health Care Data Guide:
//!   Learning from Data for Improvement*.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QipError;

/// The kind of chart drawn for a measurement series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Run chart: median center line, no control limits.
    #[default]
    Run,
    /// Individuals / moving-range chart: mean center line, limits from the
    /// mean moving range.
    Xmr,
    /// Proportion chart for percentages (0-100): mean center line, binomial
    /// limits with an assumed subgroup size.
    P,
}

impl ChartMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartMode::Run => "run",
            ChartMode::Xmr => "xmr",
            ChartMode::P => "p",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartMode {
    type Err = QipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Ok(ChartMode::Run),
            "xmr" | "i-mr" | "imr" => Ok(ChartMode::Xmr),
            "p" => Ok(ChartMode::P),
            _ => Err(QipError::UnknownChartMode(s.to_string())),
        }
    }
}

/// Control limits for a chart.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line.
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

/// Classification of a single numeric point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointClass {
    /// Routine variation.
    #[default]
    Common,
    /// Member of a run above the center line.
    SpecialCauseHigh,
    /// Member of a run below the center line.
    SpecialCauseLow,
}

impl PointClass {
    pub fn is_special(self) -> bool {
        !matches!(self, PointClass::Common)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_mode_from_str() {
        assert_eq!("run".parse::<ChartMode>().unwrap(), ChartMode::Run);
        assert_eq!("XmR".parse::<ChartMode>().unwrap(), ChartMode::Xmr);
        assert_eq!("i-mr".parse::<ChartMode>().unwrap(), ChartMode::Xmr);
        assert_eq!(" p ".parse::<ChartMode>().unwrap(), ChartMode::P);
    }

    #[test]
    fn test_chart_mode_unknown() {
        let err = "cusum".parse::<ChartMode>().unwrap_err();
        assert!(matches!(err, QipError::UnknownChartMode(ref m) if m == "cusum"));
    }

    #[test]
    fn test_chart_mode_display_roundtrip() {
        for mode in [ChartMode::Run, ChartMode::Xmr, ChartMode::P] {
            assert_eq!(mode.to_string().parse::<ChartMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ChartMode::Xmr).unwrap(), "\"xmr\"");
        assert_eq!(
            serde_json::to_string(&PointClass::SpecialCauseHigh).unwrap(),
            "\"specialCauseHigh\""
        );
        let mode: ChartMode = serde_json::from_str("\"p\"").unwrap();
        assert_eq!(mode, ChartMode::P);
    }

    #[test]
    fn test_point_class_is_special() {
        assert!(!PointClass::Common.is_special());
        assert!(PointClass::SpecialCauseHigh.is_special());
        assert!(PointClass::SpecialCauseLow.is_special());
    }
}
