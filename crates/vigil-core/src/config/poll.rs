//! Polling behavior for the scan waiter

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the status polling loop
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollSettings {
    /// Fixed delay between status polls
    #[serde(with = "duration_secs")]
    pub interval: Duration,
    /// Maximum total wall-clock time to wait for a terminal status, measured
    /// from submission
    #[serde(with = "duration_secs")]
    pub max_wait: Duration,
    /// How many consecutive transient poll errors are tolerated before the
    /// wait is escalated to a hard failure
    pub max_transient_errors: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(15 * 60),
            max_transient_errors: 3,
        }
    }
}

impl PollSettings {
    /// Set the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum total wait
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Set the transient-error budget
    pub fn with_max_transient_errors(mut self, budget: u32) -> Self {
        self.max_transient_errors = budget;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
