use crate::core::device::{AtDevice, ConnectionState, Response};
use crate::core::outcome::OutcomeSource;
use crate::domain::config::DeviceIdentity;
use crate::domain::error::{AtLinkError, AtLinkResult};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Canonical payload returned by a successful simulated send, shaped like a
/// real `AT+COPS=?` answer with the terminator already stripped.
pub const SIMULATED_RESPONSE: &str =
    "+COPS: (2,\"RADIOLINJA\",\"RL\",\"24405\"),(0,\"TELE\",\"TELE\",\"24491\")";

/// AT device double that satisfies the same contract without hardware.
///
/// Each `connect` and `send_command` draws one decision from the injected
/// outcome source; `disconnect` never fails. State transitions mirror the
/// real device exactly, so callers cannot tell the variants apart.
pub struct SimulatedDevice {
    identity: DeviceIdentity,
    state: ConnectionState,
    outcomes: Box<dyn OutcomeSource>,
}

impl SimulatedDevice {
    pub fn new(identity: DeviceIdentity, outcomes: Box<dyn OutcomeSource>) -> Self {
        Self {
            identity,
            state: ConnectionState::Disconnected,
            outcomes,
        }
    }
}

#[async_trait]
impl AtDevice for SimulatedDevice {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    async fn connect(&mut self) -> AtLinkResult<()> {
        if self.state == ConnectionState::Connected {
            return Err(AtLinkError::ProtocolViolation {
                message: format!("{} is already connected", self.identity),
            });
        }

        if self.outcomes.next_outcome() {
            info!("simulated connect to {} succeeded", self.identity);
            self.state = ConnectionState::Connected;
            Ok(())
        } else {
            warn!("simulated connect to {} refused", self.identity);
            Err(AtLinkError::ConnectionRefused {
                message: format!("simulated open of {} failed", self.identity),
            })
        }
    }

    async fn send_command(&mut self, command: &str) -> AtLinkResult<Response> {
        // No outcome is drawn for a contract violation; nothing was
        // attempted.
        if self.state != ConnectionState::Connected {
            return Err(AtLinkError::ProtocolViolation {
                message: format!("send_command on {} while disconnected", self.identity),
            });
        }

        if self.outcomes.next_outcome() {
            debug!("simulated send of {:?} to {} succeeded", command, self.identity);
            Ok(SIMULATED_RESPONSE.as_bytes().to_vec())
        } else {
            warn!("simulated send of {:?} to {} aborted", command, self.identity);
            Err(AtLinkError::ConnectionAborted {
                message: format!("simulated write to {} failed", self.identity),
            })
        }
    }

    async fn disconnect(&mut self) -> AtLinkResult<()> {
        self.state = ConnectionState::Disconnected;
        Ok(())
    }
}
