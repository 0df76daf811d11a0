use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use sha2::{Digest, Sha256};

use rackops_protocol::MAX_CHUNK_SIZE;

use crate::TransferError;

// ---------------------------------------------------------------------------
// PayloadSource
// ---------------------------------------------------------------------------

/// Sequential byte supplier for a transfer.
///
/// The engines consume a source exactly once, front to back; `offset` only
/// ever advances. `Ok(0)` signals end of data.
pub trait PayloadSource: Send {
    /// Reads up to `buf.len()` bytes starting at `offset` into `buf`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, TransferError>;
}

impl PayloadSource for File {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, TransferError> {
        self.seek(SeekFrom::Start(offset))?;
        // Plain read() may return short; fill until EOF so chunk boundaries
        // stay aligned with the cursor's offsets.
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

/// In-memory source, used by tests and for small payloads already in RAM.
impl PayloadSource for Vec<u8> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, TransferError> {
        let data = self.as_slice();
        let start = (offset as usize).min(data.len());
        let n = (data.len() - start).min(buf.len());
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n)
    }
}

impl PayloadSource for Box<dyn PayloadSource> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, TransferError> {
        (**self).read_at(offset, buf)
    }
}

// ---------------------------------------------------------------------------
// ChunkCursor
// ---------------------------------------------------------------------------

/// A chunk of payload data, `offset` bytes from the start of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub offset: u64,
    pub data: Vec<u8>,
}

/// Reads a payload in sequential chunks of at most `chunk_size` bytes.
///
/// Single-pass: the cursor never re-reads a prior range, so a failed
/// transfer cannot be resumed through the same cursor.
pub struct ChunkCursor<S> {
    source: S,
    chunk_size: usize,
    offset: u64,
}

impl<S: PayloadSource> ChunkCursor<S> {
    /// Creates a cursor over `source`.
    ///
    /// A `chunk_size` of 0 selects the protocol maximum; anything above
    /// [`MAX_CHUNK_SIZE`] is rejected.
    pub fn new(source: S, chunk_size: usize) -> Result<Self, TransferError> {
        let chunk_size = match chunk_size {
            0 => MAX_CHUNK_SIZE,
            n if n > MAX_CHUNK_SIZE => {
                return Err(TransferError::ChunkTooLarge {
                    requested: n,
                    max: MAX_CHUNK_SIZE,
                });
            }
            n => n,
        };
        Ok(Self {
            source,
            chunk_size,
            offset: 0,
        })
    }

    /// Reads the next chunk. Returns `None` once the source is exhausted.
    ///
    /// Every chunk except possibly the last is exactly `chunk_size` bytes.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, TransferError> {
        let mut buf = vec![0u8; self.chunk_size];
        let n = self.source.read_at(self.offset, &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);

        let chunk = Chunk {
            offset: self.offset,
            data: buf,
        };
        self.offset += n as u64;
        Ok(Some(chunk))
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Effective chunk size after ceiling/default resolution.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl ChunkCursor<File> {
    /// Opens a file as a chunk source.
    pub fn open(path: &std::path::Path, chunk_size: usize) -> Result<Self, TransferError> {
        Self::new(File::open(path)?, chunk_size)
    }
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Running SHA-256 over every payload byte, in send order.
pub struct DigestAccumulator {
    hasher: Sha256,
}

impl DigestAccumulator {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Folds a chunk's bytes into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finalizes and returns the hex-encoded digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl Default for DigestAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes SHA-256 of `data` in one pass and returns the hex-encoded digest.
pub fn digest_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
