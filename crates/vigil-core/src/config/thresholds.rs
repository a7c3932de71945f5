//! Severity threshold configuration

use serde::{Deserialize, Serialize};

/// Per-severity ceilings applied to the aggregated finding counts of a report.
///
/// When `enabled` is false the ceilings are never consulted, regardless of
/// their values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Master switch; absent or false means thresholds are never evaluated
    #[serde(default)]
    pub enabled: bool,
    /// Maximum tolerated high-severity findings
    #[serde(default)]
    pub high: u32,
    /// Maximum tolerated medium-severity findings
    #[serde(default)]
    pub medium: u32,
    /// Maximum tolerated low-severity findings
    #[serde(default)]
    pub low: u32,
}

impl ThresholdConfig {
    /// Enabled config with the given ceilings
    pub fn ceilings(high: u32, medium: u32, low: u32) -> Self {
        Self {
            enabled: true,
            high,
            medium,
            low,
        }
    }

    /// Disabled config; evaluation always yields no violations
    pub fn disabled() -> Self {
        Self::default()
    }
}
