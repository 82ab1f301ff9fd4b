use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-phase socket timeouts of the DNS client. Read-only once the client is
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_timeout_secs")]
    pub dial_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl ClientConfig {
    pub fn with_uniform_timeout(secs: u64) -> Self {
        Self {
            dial_timeout_secs: secs,
            read_timeout_secs: secs,
            write_timeout_secs: secs,
        }
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_uniform_timeout(default_timeout_secs())
    }
}

fn default_timeout_secs() -> u64 {
    5
}
