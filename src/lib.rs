//! AtLink Library
//!
//! Asynchronous AT command exchange with line-oriented serial devices,
//! with an identically-behaving simulated variant for use without hardware.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::device::{AtDevice, ConnectionState, Response};
pub use crate::core::framer::{FrameProgress, ResponseFramer, RESPONSE_TERMINATOR};
pub use crate::core::outcome::{FixedOutcomes, OutcomeSource, RandomOutcomes, ScriptedOutcomes};
pub use crate::domain::config::{AtLinkConfig, DeviceIdentity, ExchangePolicy};
pub use crate::domain::error::{AtLinkError, AtLinkResult};
pub use crate::infrastructure::serial::SerialDevice;
pub use crate::infrastructure::sim::{SimulatedDevice, SIMULATED_RESPONSE};
