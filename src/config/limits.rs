//! Line, queue and write limits configuration.

use serde::Deserialize;
use std::time::Duration;

/// Per-connection resource limits.
///
/// These bound how much a single slow or abusive client can buffer inside
/// the server before its traffic is dropped or its connection closed.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes, terminator included (default: 512).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Capacity of each client's outgoing queue (default: 256).
    /// Lines addressed to a client whose queue is full are dropped.
    #[serde(default = "default_send_queue")]
    pub send_queue: usize,
    /// Capacity of the shared inbound queue feeding the dispatcher (default: 1024).
    #[serde(default = "default_dispatch_queue")]
    pub dispatch_queue: usize,
    /// Seconds a single socket write may take before the connection is closed (default: 10).
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl LimitsConfig {
    /// Write timeout as a [`Duration`].
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            send_queue: default_send_queue(),
            dispatch_queue: default_dispatch_queue(),
            write_timeout_secs: default_write_timeout_secs(),
        }
    }
}

fn default_max_line_len() -> usize {
    512
}

fn default_send_queue() -> usize {
    256
}

fn default_dispatch_queue() -> usize {
    1024
}

fn default_write_timeout_secs() -> u64 {
    10
}
