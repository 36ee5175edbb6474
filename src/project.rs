//! Quality Improvement Project state as an immutable value.
//!
//! A [`Project`] is never edited in place. Each edit is a [`ProjectUpdate`]
//! applied with [`Project::apply`], which returns the next project value and
//! leaves the previous one untouched. The SPC analyzer only ever sees the
//! measurement slice produced by [`Project::chart_points`].
//!
//! ```
//! use chrono::NaiveDate;
//! use qip_analytics::{ChartMode, MeasurementPoint, Project, ProjectUpdate, SpcAnalyzer};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let project = Project::new("Reduce DNA rate")
//!     .apply(ProjectUpdate::SetChartMode(ChartMode::Xmr))
//!     .unwrap()
//!     .apply(ProjectUpdate::AddMeasurement(MeasurementPoint::new(date, 12.0, "outcome")))
//!     .unwrap();
//!
//! let result = project.analysis(&SpcAnalyzer::new());
//! assert_eq!(result.center, 12.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QipError, Result};
use crate::series::{
    deserialize_lenient_series, parse_series, MeasurementPoint, RawMeasurement,
    INTERVENTION_CATEGORY,
};
use crate::spc::{AnalysisResult, ChartMode, SpcAnalyzer};

/// One Plan-Do-Study-Act cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PdsaCycle {
    pub title: String,
    /// Date the change was introduced; marks an intervention on the chart.
    pub start_date: Option<NaiveDate>,
    pub plan: String,
    #[serde(rename = "do")]
    pub do_: String,
    pub study: String,
    pub act: String,
}

impl PdsaCycle {
    pub fn new(title: impl Into<String>, start_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            start_date,
            ..Self::default()
        }
    }
}

/// A documented improvement project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub problem: String,
    pub aim: String,
    pub chart_mode: ChartMode,
    /// Entries without a parseable date are dropped on decode.
    #[serde(deserialize_with = "deserialize_lenient_series")]
    pub measurements: Vec<MeasurementPoint>,
    pub pdsa_cycles: Vec<PdsaCycle>,
}

/// A single edit to a project.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectUpdate {
    SetTitle(String),
    SetProblem(String),
    SetAim(String),
    SetChartMode(ChartMode),
    AddMeasurement(MeasurementPoint),
    UpdateMeasurement { index: usize, point: MeasurementPoint },
    RemoveMeasurement(usize),
    /// Bulk import; rows with unparseable dates are skipped.
    ImportMeasurements(Vec<RawMeasurement>),
    AddPdsaCycle(PdsaCycle),
    RemovePdsaCycle(usize),
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Decode a project document.
    ///
    /// Measurement rows with a missing or unparseable date are skipped rather
    /// than failing the whole document.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Encode the project as a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Return the project with `update` applied.
    pub fn apply(&self, update: ProjectUpdate) -> Result<Project> {
        let mut next = self.clone();
        match update {
            ProjectUpdate::SetTitle(title) => next.title = title,
            ProjectUpdate::SetProblem(problem) => next.problem = problem,
            ProjectUpdate::SetAim(aim) => next.aim = aim,
            ProjectUpdate::SetChartMode(mode) => next.chart_mode = mode,
            ProjectUpdate::AddMeasurement(point) => next.measurements.push(point),
            ProjectUpdate::UpdateMeasurement { index, point } => {
                let len = next.measurements.len();
                let slot = next
                    .measurements
                    .get_mut(index)
                    .ok_or(QipError::MeasurementOutOfRange { index, len })?;
                *slot = point;
            }
            ProjectUpdate::RemoveMeasurement(index) => {
                let len = next.measurements.len();
                if index >= len {
                    return Err(QipError::MeasurementOutOfRange { index, len });
                }
                next.measurements.remove(index);
            }
            ProjectUpdate::ImportMeasurements(rows) => {
                let parsed = parse_series(&rows);
                debug!(
                    rows = rows.len(),
                    imported = parsed.len(),
                    "imported measurement rows"
                );
                next.measurements.extend(parsed);
            }
            ProjectUpdate::AddPdsaCycle(cycle) => next.pdsa_cycles.push(cycle),
            ProjectUpdate::RemovePdsaCycle(index) => {
                let len = next.pdsa_cycles.len();
                if index >= len {
                    return Err(QipError::PdsaCycleOutOfRange { index, len });
                }
                next.pdsa_cycles.remove(index);
            }
        }
        Ok(next)
    }

    /// Measurements plus one value-less intervention marker per dated PDSA cycle.
    pub fn chart_points(&self) -> Vec<MeasurementPoint> {
        let markers = self
            .pdsa_cycles
            .iter()
            .filter_map(|c| c.start_date)
            .map(|date| MeasurementPoint::annotation(date, INTERVENTION_CATEGORY));
        self.measurements.iter().cloned().chain(markers).collect()
    }

    /// Analyze the project's series with its chart mode.
    pub fn analysis(&self, analyzer: &SpcAnalyzer) -> AnalysisResult {
        analyzer.analyze(&self.chart_points(), self.chart_mode)
    }
}
