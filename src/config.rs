//! Analyzer configuration.
//!
//! Only the runs-rule threshold and the nominal `p` chart subgroup size are
//! tunable. The individuals-chart factor (2.66) is fixed.
//!
//! ```
//! use qip_analytics::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::from_toml_str("run_length = 8").unwrap();
//! assert_eq!(config.run_length, 8);
//! assert_eq!(config.p_chart_subgroup_size, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{QipError, Result};

/// Default number of consecutive points on one side of the center line that
/// signals special-cause variation.
pub const DEFAULT_RUN_LENGTH: usize = 6;

/// Default assumed subgroup size for `p` mode limits.
pub const DEFAULT_P_CHART_SUBGROUP_SIZE: u32 = 20;

/// Tunable parameters of the SPC analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Run length that triggers special-cause classification.
    pub run_length: usize,
    /// Nominal subgroup size used for the binomial sigma in `p` mode.
    ///
    /// A true p-chart needs the actual subgroup size of every point; this
    /// value is a fixed approximation applied to the whole series.
    pub p_chart_subgroup_size: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            run_length: DEFAULT_RUN_LENGTH,
            p_chart_subgroup_size: DEFAULT_P_CHART_SUBGROUP_SIZE,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from TOML, filling missing keys with defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a usable analyzer.
    pub fn validate(&self) -> Result<()> {
        if self.run_length < 2 {
            return Err(QipError::InvalidConfig(format!(
                "run_length must be >= 2, got {}",
                self.run_length
            )));
        }
        if self.p_chart_subgroup_size == 0 {
            return Err(QipError::InvalidConfig(
                "p_chart_subgroup_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
