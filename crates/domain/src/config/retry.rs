use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for retrying a single record-type query.
///
/// Both limits are optional; with neither set a query is retried until it
/// succeeds or the run is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub max_attempts: Option<u32>,

    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl RetryConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.deadline_secs.is_none()
    }
}
