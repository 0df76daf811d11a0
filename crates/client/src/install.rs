//! Negotiated OS-image install over one bidirectional stream.
//!
//! The engine sends the transfer-open frame, then waits for the device's
//! first signal. A device that already holds the package validates without
//! any transfer; otherwise it reports readiness and the engine streams
//! chunks from the invoking task while a single spawned task keeps
//! consuming signals. Both sides share a session cancellation token, so
//! either side failing (or the receive side reaching a terminal signal)
//! stops the other promptly.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use rackops_protocol::{InstallRequest, InstallSignal, TransferOpen, Validated};
use rackops_transfer::{ChunkCursor, PayloadSource};

use crate::error::ClientError;
use crate::stream::InstallStream;

/// Parameters of one install invocation.
#[derive(Debug, Clone, Default)]
pub struct InstallConfig {
    /// Version the package must report once validated.
    pub version: String,
    /// Install on the standby supervisor.
    pub standby_supervisor: bool,
    /// Chunk size for the content frames (0 selects the protocol maximum).
    pub chunk_size: usize,
}

/// Installs a package on the target.
///
/// `source` may be `None` when the caller expects the device to already
/// hold the package; if the device then asks for a transfer anyway, the
/// call fails before any payload frame is sent.
///
/// On the transferred path the validated version must match
/// `config.version`; a device that validates without a transfer is
/// returned as-is.
pub async fn install<S: PayloadSource>(
    stream: Arc<dyn InstallStream>,
    config: InstallConfig,
    source: Option<S>,
    cancel: CancellationToken,
) -> Result<Validated, ClientError> {
    // Validate the chunk size before any network activity.
    let mut cursor = match source {
        Some(src) => Some(ChunkCursor::new(src, config.chunk_size)?),
        None => None,
    };

    let open = TransferOpen {
        version: config.version.clone(),
        standby_supervisor: config.standby_supervisor,
    };
    tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ClientError::Cancelled),
        res = stream.send(InstallRequest::TransferOpen(open)) => res?,
    }

    // First signal decides the shape: validated-without-transfer returns
    // immediately, the payload source untouched.
    if let Some(validated) = await_package_outcome(stream.as_ref(), &cancel, false).await? {
        info!(version = %validated.version, "package already validated on target");
        return Ok(validated);
    }

    let Some(cursor) = cursor.as_mut() else {
        return Err(ClientError::MissingSource);
    };

    // The receive loop runs as its own task; the send loop stays on the
    // invoking task. The session token ties them together: the receive
    // loop cancels it on exit (terminal signal or failure), and a send
    // failure cancels it explicitly below.
    let session = cancel.child_token();
    let recv_stream = Arc::clone(&stream);
    let recv_token = session.clone();
    let recv_task = tokio::spawn(async move {
        let _stop_send = recv_token.clone().drop_guard();
        await_package_outcome(recv_stream.as_ref(), &recv_token, true).await
    });

    if let Err(e) = send_content(stream.as_ref(), cursor, &session).await {
        session.cancel();
        let _ = recv_task.await;
        return Err(e);
    }

    // With transfer_started the receive loop only resolves with a
    // validation; anything else already surfaced as an error.
    let validated = recv_task
        .await
        .map_err(|e| ClientError::Stream(format!("receive task failed: {e}")))??
        .ok_or_else(|| ClientError::UnexpectedSignal("transferReady".into()))?;

    if validated.version != config.version {
        return Err(ClientError::VersionMismatch {
            got: validated.version,
            want: config.version,
        });
    }
    Ok(validated)
}

/// Receives signals until the install resolves.
///
/// Returns `Ok(Some(validated))` once the device validates the package and
/// `Ok(None)` on readiness-to-receive — but only before the transfer has
/// started; afterwards readiness is out of sequence. Progress signals are
/// logged and skipped. Device errors, unrecognized signals, and
/// cancellation are terminal.
async fn await_package_outcome(
    stream: &dyn InstallStream,
    cancel: &CancellationToken,
    transfer_started: bool,
) -> Result<Option<Validated>, ClientError> {
    loop {
        let signal = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            signal = stream.recv() => signal?,
        };
        match signal {
            InstallSignal::Validated(validated) => return Ok(Some(validated)),
            InstallSignal::TransferReady if !transfer_started => return Ok(None),
            InstallSignal::TransferProgress { bytes_received } => {
                info!(bytes_received, "install progress: bytes received by target");
            }
            InstallSignal::SyncProgress {
                percentage_transferred,
            } => {
                info!(
                    percentage_transferred,
                    "install progress: syncing to standby supervisor"
                );
            }
            InstallSignal::InstallError { kind, detail } => {
                return Err(ClientError::Remote { kind, detail });
            }
            other => return Err(ClientError::UnexpectedSignal(other.name().to_string())),
        }
    }
}

/// Streams payload chunks followed by the end-of-transfer marker.
///
/// Observing session cancellation is a clean stop, not an error: it means
/// the receive loop already resolved the install (or the caller gave up),
/// and no payload may be sent after that point. The real outcome is read
/// from the receive task by the caller.
async fn send_content<S: PayloadSource>(
    stream: &dyn InstallStream,
    cursor: &mut ChunkCursor<S>,
    session: &CancellationToken,
) -> Result<(), ClientError> {
    loop {
        if session.is_cancelled() {
            return Ok(());
        }
        let Some(chunk) = cursor.next_chunk()? else {
            break;
        };
        let size = chunk.data.len();
        tokio::select! {
            biased;
            _ = session.cancelled() => return Ok(()),
            res = stream.send(InstallRequest::Content(chunk.data)) => res?,
        }
        debug!(offset = cursor.offset(), size, "sent content chunk");
    }
    tokio::select! {
        biased;
        _ = session.cancelled() => Ok(()),
        res = stream.send(InstallRequest::TransferEnd) => res,
    }
}
