//! Bounded-retry status polling.
//!
//! After a state-changing call (a reboot, typically) the target takes an
//! unknown amount of time to settle. [`await_terminal`] alternates
//! query → sleep → query until the caller's predicate declares the
//! response terminal, retrying errors the caller explicitly tolerates.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ClientError;

/// What a status response means for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No further progress is expected; return the response.
    Terminal,
    /// Keep polling, optionally after a device-suggested wait.
    NotYet(Option<Duration>),
}

/// Polls `query` until `judge` declares a response terminal.
///
/// - A response judged `NotYet` sleeps the suggested wait if one was
///   carried, otherwise `wait_interval`, then queries again.
/// - A query error matching `tolerated` is retried after `wait_interval`;
///   any other error is returned immediately.
/// - Cancellation is observed at the top of every iteration, during the
///   in-flight query (which is then discarded), and during every sleep.
///
/// No iteration cap is enforced here: a target that never reaches the
/// terminal state keeps the loop alive until the caller's token fires.
/// Callers own the deadline.
pub async fn await_terminal<R, Q, F, J, T>(
    cancel: &CancellationToken,
    mut query: Q,
    judge: J,
    wait_interval: Duration,
    tolerated: T,
) -> Result<R, ClientError>
where
    Q: FnMut() -> F,
    F: Future<Output = Result<R, ClientError>>,
    J: Fn(&R) -> Verdict,
    T: Fn(&ClientError) -> bool,
{
    loop {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = query() => result,
        };

        let wait = match result {
            Ok(response) => match judge(&response) {
                Verdict::Terminal => return Ok(response),
                Verdict::NotYet(hint) => {
                    let wait = hint.unwrap_or(wait_interval);
                    debug!(wait_ms = wait.as_millis() as u64, "not yet terminal");
                    wait
                }
            },
            Err(e) if tolerated(&e) => {
                warn!(error = %e, "status query failed with tolerated error, retrying");
                wait_interval
            }
            Err(e) => return Err(e),
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(wait) => {}
        }
    }
}
