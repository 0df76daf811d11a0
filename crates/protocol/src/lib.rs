//! Wire-facing message taxonomy for rackops device-management sessions.
//!
//! This crate defines the frames a client exchanges with a managed device:
//! transfer negotiation, payload chunks, the digest trailer, and the
//! asynchronous signals the device emits while an install is in flight.
//! It carries no transport code — transports serialize these types however
//! they like (the serde derives produce a JSON shape with camelCase keys
//! and base64 byte fields).

pub mod messages;
pub mod types;

pub use messages::{InstallRequest, InstallSignal, PutAck, PutRequest};
pub use types::{
    HashMethod, HashTrailer, InstallErrorKind, PutDetails, RebootMethod, RebootStatus,
    TransferOpen, Validated,
};

/// Maximum size of a single payload chunk, fixed by the protocol.
///
/// Transfers may negotiate smaller chunks but never larger ones.
pub const MAX_CHUNK_SIZE: usize = 64_000;
