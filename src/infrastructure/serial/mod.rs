use crate::core::device::{AtDevice, ConnectionState, Response};
use crate::core::framer::{FrameProgress, ResponseFramer};
use crate::domain::config::{DeviceIdentity, ExchangePolicy};
use crate::domain::error::{AtLinkError, AtLinkResult};
use async_trait::async_trait;
use serialport::SerialPort;
use std::io::{Read, Write};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info, warn};

/// Blocking read timeout of the port; doubles as the poll interval while
/// waiting out the exchange deadline.
const READ_POLL_INTERVAL: Duration = Duration::from_millis(100);

const READ_CHUNK_SIZE: usize = 256;

/// Real AT device backed by an OS serial port.
///
/// The port handle is exclusively owned here and exists only while the
/// device is connected; dropping it closes the OS handle on every exit
/// path. Blocking serial I/O runs on the tokio blocking pool so the async
/// caller never stalls a worker thread.
pub struct SerialDevice {
    identity: DeviceIdentity,
    policy: ExchangePolicy,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialDevice {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self::with_policy(identity, ExchangePolicy::default())
    }

    pub fn with_policy(identity: DeviceIdentity, policy: ExchangePolicy) -> Self {
        Self {
            identity,
            policy,
            port: None,
        }
    }

    pub fn policy(&self) -> &ExchangePolicy {
        &self.policy
    }
}

#[async_trait]
impl AtDevice for SerialDevice {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    fn state(&self) -> ConnectionState {
        if self.port.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    async fn connect(&mut self) -> AtLinkResult<()> {
        if self.port.is_some() {
            return Err(AtLinkError::ProtocolViolation {
                message: format!("{} is already connected", self.identity),
            });
        }

        let identity = self.identity.clone();
        let opened = task::spawn_blocking(move || {
            serialport::new(&identity.port, identity.baud_rate)
                .timeout(READ_POLL_INTERVAL)
                .open()
        })
        .await
        .map_err(|e| AtLinkError::ConnectionRefused {
            message: format!("open task for {} failed: {}", self.identity, e),
        })?;

        match opened {
            Ok(port) => {
                info!("opened serial port {}", self.identity);
                self.port = Some(port);
                Ok(())
            }
            Err(e) => {
                warn!("failed to open serial port {}: {}", self.identity, e);
                Err(AtLinkError::ConnectionRefused {
                    message: format!("failed to open {}: {}", self.identity, e),
                })
            }
        }
    }

    async fn send_command(&mut self, command: &str) -> AtLinkResult<Response> {
        let mut port = self.port.take().ok_or_else(|| AtLinkError::ProtocolViolation {
            message: format!("send_command on {} while disconnected", self.identity),
        })?;

        let bytes = command.as_bytes().to_vec();
        let policy = self.policy.clone();
        let exchange = task::spawn_blocking(move || {
            let result = run_exchange(&mut *port, &bytes, &policy);
            (port, result)
        })
        .await;

        match exchange {
            Ok((port, result)) => {
                // The connection stays open after a failed exchange; the
                // caller decides whether it is still trustworthy.
                self.port = Some(port);
                if let Ok(payload) = &result {
                    debug!("{} answered with {} payload bytes", self.identity, payload.len());
                }
                result
            }
            // The exchange task panicked and took the handle with it; the
            // drop already closed the port, so the device reads Disconnected.
            Err(e) => Err(AtLinkError::ConnectionAborted {
                message: format!("exchange task for {} failed: {}", self.identity, e),
            }),
        }
    }

    async fn disconnect(&mut self) -> AtLinkResult<()> {
        if let Some(port) = self.port.take() {
            drop(port);
            info!("closed serial port {}", self.identity);
        }
        Ok(())
    }
}

/// One blocking write-then-read-until-terminator exchange.
fn run_exchange(
    port: &mut dyn SerialPort,
    command: &[u8],
    policy: &ExchangePolicy,
) -> AtLinkResult<Response> {
    port.write_all(command)
        .and_then(|_| port.flush())
        .map_err(|e| AtLinkError::ConnectionAborted {
            message: format!("write failed: {}", e),
        })?;

    let mut framer = ResponseFramer::new(policy.max_response_bytes);
    let deadline = Instant::now() + policy.response_timeout();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match port.read(&mut chunk) {
            Ok(0) => {
                return Err(AtLinkError::ConnectionAborted {
                    message: "port closed by peer".to_string(),
                })
            }
            Ok(n) => {
                if let FrameProgress::Complete { payload, .. } = framer.push(&chunk[..n])? {
                    return Ok(payload);
                }
            }
            // The poll interval elapsed without data; fall through to the
            // deadline check.
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(e) => {
                return Err(AtLinkError::ConnectionAborted {
                    message: format!("read failed: {}", e),
                })
            }
        }

        if Instant::now() >= deadline {
            return Err(AtLinkError::ProtocolViolation {
                message: format!(
                    "no terminator within {} ms ({} bytes buffered)",
                    policy.response_timeout_ms,
                    framer.buffered()
                ),
            });
        }
    }
}
