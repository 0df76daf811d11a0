//! Client error taxonomy.

use rackops_protocol::InstallErrorKind;
use rackops_transfer::TransferError;

/// Errors produced by the transfer and status-poll engines.
///
/// Transport implementations map connection-level failures to [`Stream`]
/// and transient target-down conditions to [`Unreachable`] so callers can
/// name the latter in a tolerated-error predicate.
///
/// [`Stream`]: ClientError::Stream
/// [`Unreachable`]: ClientError::Unreachable
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("stream error: {0}")]
    Stream(String),

    #[error("target unreachable: {0}")]
    Unreachable(String),

    #[error("device reported {kind:?} error: {detail}")]
    Remote {
        kind: InstallErrorKind,
        detail: String,
    },

    #[error("unexpected signal: {0}")]
    UnexpectedSignal(String),

    #[error("no payload source supplied for transfer")]
    MissingSource,

    #[error("installed version {got:?} does not match requested version {want:?}")]
    VersionMismatch { got: String, want: String },

    #[error("cancelled")]
    Cancelled,

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),
}
