//! Error type shared by the configuration, parsing and project layers.
//!
//! The SPC analyzer itself is infallible: malformed rows and empty series are
//! absorbed into the shape of the [`AnalysisResult`](crate::spc::AnalysisResult).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QipError {
    #[error("unknown chart mode: {0:?} (expected \"run\", \"xmr\" or \"p\")")]
    UnknownChartMode(String),

    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(String),

    #[error("measurement index {index} out of range (series has {len} points)")]
    MeasurementOutOfRange { index: usize, len: usize },

    #[error("PDSA cycle index {index} out of range (project has {len} cycles)")]
    PdsaCycleOutOfRange { index: usize, len: usize },

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to decode project document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QipError>;
