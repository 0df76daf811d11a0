//! Transport traits the engines run against.
//!
//! The actual connection (gRPC, WebSocket, a test double) lives outside this
//! crate; implementations bridge these traits to it. Using traits keeps the
//! engines decoupled from transport and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use rackops_protocol::{InstallRequest, InstallSignal, PutAck, PutRequest, RebootStatus};

use crate::error::ClientError;
use crate::system::RebootConfig;

/// Boxed future, for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One bidirectional install stream to a single target.
///
/// The stream is exclusively owned by the engine invocation that opened it
/// and is not safe for reuse after the call returns, for any reason. `send`
/// and `recv` are called from two concurrent tasks of the same session,
/// never from two sessions.
pub trait InstallStream: Send + Sync {
    fn send(&self, req: InstallRequest) -> BoxFuture<'_, Result<(), ClientError>>;
    fn recv(&self) -> BoxFuture<'_, Result<InstallSignal, ClientError>>;
}

/// One file-put stream to a single target.
pub trait PutStream: Send + Sync {
    fn send(&self, req: PutRequest) -> BoxFuture<'_, Result<(), ClientError>>;
    /// Signals end of the request stream and waits for the final
    /// acknowledgement.
    fn close_and_recv(&self) -> BoxFuture<'_, Result<PutAck, ClientError>>;
}

/// Unary request/response calls on the target's system service.
pub trait SystemClient: Send + Sync {
    fn reboot(&self, config: &RebootConfig) -> BoxFuture<'_, Result<(), ClientError>>;
    fn reboot_status(&self) -> BoxFuture<'_, Result<RebootStatus, ClientError>>;
}
