//! Severity threshold evaluation.
//!
//! A pure comparison of aggregated finding counts against configured
//! ceilings; evaluation never mutates state and the same inputs always yield
//! the same violations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::scan::types::SeverityCounts;

/// Severity bucket of a finding count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(name)
    }
}

/// One exceeded ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdViolation {
    pub severity: Severity,
    pub observed: u32,
    pub ceiling: u32,
}

impl fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} findings: {} observed, threshold {}",
            self.severity, self.observed, self.ceiling
        )
    }
}

/// Compare counts against configured ceilings.
///
/// Disabled configs yield no violations unconditionally. Otherwise each
/// severity violates independently when `observed > ceiling` (strict), and
/// the output is ordered high, medium, low.
pub fn evaluate_thresholds(
    counts: &SeverityCounts,
    config: &ThresholdConfig,
) -> Vec<ThresholdViolation> {
    if !config.enabled {
        return Vec::new();
    }

    let checks = [
        (Severity::High, counts.high, config.high),
        (Severity::Medium, counts.medium, config.medium),
        (Severity::Low, counts.low, config.low),
    ];

    checks
        .into_iter()
        .filter(|(_, observed, ceiling)| observed > ceiling)
        .map(|(severity, observed, ceiling)| ThresholdViolation {
            severity,
            observed,
            ceiling,
        })
        .collect()
}
