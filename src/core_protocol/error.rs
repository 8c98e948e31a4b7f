use thiserror::Error;

/// Violations of the two-socket session protocol by the peer. These are
/// terminal for the offending session only; the listener keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("missing callback address")]
    MissingCallbackAddress,

    #[error("missing callback port")]
    MissingCallbackPort,
}
