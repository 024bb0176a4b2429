use thiserror::Error;

/// AtLink unified error type
///
/// Every fallible device operation resolves to one of the first three kinds;
/// lower-level I/O faults are mapped at the device boundary and never escape
/// untyped.
#[derive(Error, Debug)]
pub enum AtLinkError {
    /// The port could not be opened or configured.
    #[error("Connection refused: {message}")]
    ConnectionRefused { message: String },

    /// A write or read failed after the connection was established.
    #[error("Connection aborted: {message}")]
    ConnectionAborted { message: String },

    /// I/O completed but the protocol contract was broken: no terminator
    /// within the time or buffer policy, or an operation called in the
    /// wrong connection state.
    #[error("Protocol violation: {message}")]
    ProtocolViolation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type AtLinkResult<T> = Result<T, AtLinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AtLinkError::ConnectionRefused {
            message: "no such port".to_string(),
        };
        assert_eq!(err.to_string(), "Connection refused: no such port");

        let err = AtLinkError::ProtocolViolation {
            message: "terminator never arrived".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Protocol violation: terminator never arrived"
        );
    }
}
