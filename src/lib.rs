//! # qip-analytics
//!
//! Statistical process control (SPC) for healthcare Quality Improvement
//! Projects documented with the Plan-Do-Study-Act (PDSA) method.
//!
//! The crate turns a dated measurement series into a center line, optional
//! control limits, a per-point special-cause classification and a one-line
//! narrative. It is the computational core a form-and-dashboard application
//! embeds; storage, rendering and editing UI live elsewhere.
//!
//! ## Modules
//!
//! - [`spc`] — Run, XmR and p charts with the 6-point runs rule
//! - [`series`] — Measurement points and permissive row parsing
//! - [`project`] — Immutable project value with PDSA cycles
//! - [`config`] — Analyzer configuration
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use qip_analytics::{analyze, ChartMode, MeasurementPoint};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let points = vec![
//!     MeasurementPoint::new(day(1), 1.0, "outcome"),
//!     MeasurementPoint::new(day(2), 2.0, "outcome"),
//!     MeasurementPoint::new(day(3), 3.0, "outcome"),
//!     MeasurementPoint::new(day(4), 4.0, "outcome"),
//!     MeasurementPoint::new(day(5), 5.0, "outcome"),
//! ];
//!
//! let result = analyze(&points, ChartMode::Run);
//! assert_eq!(result.center, 3.0);
//! assert!(result.upper_limit.is_none());
//! assert_eq!(result.narrative, "Center line at 3.0. Common Cause Variation only.");
//! ```

pub mod config;
mod error;
pub mod project;
pub mod series;
pub mod spc;

pub use config::AnalyzerConfig;
pub use error::{QipError, Result};
pub use project::{PdsaCycle, Project, ProjectUpdate};
pub use series::{MeasurementPoint, RawMeasurement};
pub use spc::{analyze, analyze_raw, AnalysisResult, ChartMode, PointClass, SpcAnalyzer};
