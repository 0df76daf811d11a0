//! Transfer and status-poll engines for rackops device management.
//!
//! This crate implements the client-side sequencing for the two operations
//! with real protocol logic — everything else on a managed device is a
//! plain request/response call:
//!
//! 1. **Install** ([`install`]) — negotiated OS-image transfer: one open
//!    frame, then either an immediate validation from a device that already
//!    holds the package, or chunked content streaming interleaved with the
//!    device's asynchronous progress/validation signals.
//! 2. **Put** ([`put`]) — direct file push: open frame, content chunks with
//!    a running SHA-256, digest trailer, final acknowledgement.
//! 3. **Reboot confirmation** ([`reboot_and_await`]) — trigger plus a
//!    bounded-retry poll loop ([`await_terminal`]) that tolerates the
//!    target dropping off the network mid-reboot.
//!
//! Transport is abstracted behind the traits in [`stream`]; every blocking
//! point observes the caller's `CancellationToken`, and no engine imposes
//! a timeout of its own.

pub mod error;
pub mod install;
pub mod poll;
pub mod put;
pub mod stream;
pub mod system;

// Re-export primary types for convenience.
pub use error::ClientError;
pub use install::{InstallConfig, install};
pub use poll::{Verdict, await_terminal};
pub use put::{PutConfig, put};
pub use stream::{BoxFuture, InstallStream, PutStream, SystemClient};
pub use system::{RebootConfig, reboot_and_await};
