//! Chunked payload reading with running digest accumulation.
//!
//! A [`ChunkCursor`] slices a [`PayloadSource`] into sequential chunks of at
//! most the protocol ceiling; the transfer engines feed every chunk through a
//! [`DigestAccumulator`] so the trailer digest covers all bytes in send order.

mod chunked;

pub use chunked::{Chunk, ChunkCursor, DigestAccumulator, PayloadSource, digest_bytes};

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chunk size {requested} exceeds protocol maximum {max}")]
    ChunkTooLarge { requested: usize, max: usize },
}
