use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity of a serial device: OS port name plus line speed.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Port name, e.g. "/dev/ttyUSB0" or "COM3"
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
}

impl DeviceIdentity {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
        }
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.port, self.baud_rate)
    }
}

/// Policy limits for a single command/response exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangePolicy {
    /// How long to wait for the response terminator before giving up
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
    /// Maximum bytes accumulated while waiting for the terminator
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl ExchangePolicy {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

/// AtLink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtLinkConfig {
    /// Device identity
    pub device: DeviceIdentity,
    /// Exchange policy limits
    #[serde(default)]
    pub policy: ExchangePolicy,
}

// Default value functions
fn default_response_timeout_ms() -> u64 {
    5000
}

fn default_max_response_bytes() -> usize {
    4096
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud_rate() -> u32 {
    9600
}

impl Default for ExchangePolicy {
    fn default() -> Self {
        Self {
            response_timeout_ms: default_response_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for AtLinkConfig {
    fn default() -> Self {
        Self {
            device: DeviceIdentity::default(),
            policy: ExchangePolicy::default(),
        }
    }
}
