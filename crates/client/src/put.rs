//! Direct-push file transfer with a trailing digest.
//!
//! Simpler of the two transfer shapes: no negotiation round-trip, no
//! concurrent receive loop. The engine sends the open frame, every chunk in
//! order while folding it into a running SHA-256, then the digest trailer,
//! and blocks for the single final acknowledgement.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use rackops_protocol::{HashMethod, HashTrailer, PutAck, PutDetails, PutRequest};
use rackops_transfer::{ChunkCursor, DigestAccumulator, PayloadSource};

use crate::error::ClientError;
use crate::stream::PutStream;

/// Parameters of one put invocation.
#[derive(Debug, Clone, Default)]
pub struct PutConfig {
    /// Destination path on the target.
    pub remote_file: String,
    /// Octal permission bits to apply (0 leaves the target default).
    pub permissions: u32,
    /// Chunk size for the content frames (0 selects the protocol maximum).
    pub chunk_size: usize,
}

/// Copies a payload to a file on the target.
///
/// The source is read sequentially, exactly once. The trailer digest
/// covers every byte sent, in send order, so the target can verify the
/// whole file before acknowledging.
pub async fn put<S: PayloadSource>(
    stream: Arc<dyn PutStream>,
    config: PutConfig,
    source: S,
    cancel: CancellationToken,
) -> Result<PutAck, ClientError> {
    let mut cursor = ChunkCursor::new(source, config.chunk_size)?;

    let details = PutDetails {
        remote_file: config.remote_file,
        permissions: config.permissions,
    };
    send_guarded(stream.as_ref(), PutRequest::Open(details), &cancel).await?;

    let mut digest = DigestAccumulator::new();
    loop {
        let Some(chunk) = cursor.next_chunk()? else {
            break;
        };
        let size = chunk.data.len();
        digest.update(&chunk.data);
        send_guarded(stream.as_ref(), PutRequest::Contents(chunk.data), &cancel).await?;
        debug!(offset = cursor.offset(), size, "sent file chunk");
    }

    let trailer = HashTrailer {
        method: HashMethod::Sha256,
        digest: digest.finish(),
    };
    send_guarded(stream.as_ref(), PutRequest::Hash(trailer), &cancel).await?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        ack = stream.close_and_recv() => ack,
    }
}

/// Sends one frame, abandoning a stalled write when the caller cancels.
async fn send_guarded(
    stream: &dyn PutStream,
    req: PutRequest,
    cancel: &CancellationToken,
) -> Result<(), ClientError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        res = stream.send(req) => res,
    }
}
