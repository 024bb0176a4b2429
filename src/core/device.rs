use crate::domain::{config::DeviceIdentity, error::AtLinkResult};
use async_trait::async_trait;

/// Connection state of a device instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connected => write!(f, "Connected"),
        }
    }
}

/// Response payload bytes, framing terminator removed.
pub type Response = Vec<u8>;

/// Contract shared by the real and the simulated AT device.
///
/// Operations take `&mut self`, so the borrow checker enforces at most one
/// in-flight operation per instance; callers sequence connect, send and
/// disconnect by awaiting each in turn.
#[async_trait]
pub trait AtDevice: Send {
    fn identity(&self) -> &DeviceIdentity;

    fn state(&self) -> ConnectionState;

    /// Transition Disconnected -> Connected. Failure leaves the device
    /// Disconnected; connecting while already connected is a
    /// `ProtocolViolation`.
    async fn connect(&mut self) -> AtLinkResult<()>;

    /// Write the command (line terminator included by the caller) and wait
    /// for the framed response. Requires Connected; a failure leaves the
    /// connection open but unreliable.
    async fn send_command(&mut self, command: &str) -> AtLinkResult<Response>;

    /// Release the underlying resource unconditionally. Safe to repeat;
    /// always leaves the device Disconnected.
    async fn disconnect(&mut self) -> AtLinkResult<()>;
}
