//! Reboot trigger and post-reboot confirmation.
//!
//! Rebooting is the one simple operation that needs the poll engine:
//! the trigger returns long before the target settles, and mid-reboot
//! the target is usually unreachable for a while.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use rackops_protocol::{RebootMethod, RebootStatus};

use crate::error::ClientError;
use crate::poll::{Verdict, await_terminal};
use crate::stream::SystemClient;

/// Parameters of one reboot invocation.
#[derive(Debug, Clone, Default)]
pub struct RebootConfig {
    pub method: RebootMethod,
    /// Informational reason recorded on the target.
    pub message: String,
    /// Reboot even if the target's sanity checks fail.
    pub force: bool,
}

/// Triggers a reboot and polls until the target reports it finished.
///
/// `tolerated` names the transient error class to retry — typically
/// [`ClientError::Unreachable`], since the target drops off the network
/// mid-reboot. The device's own wait hint, when present in a status
/// response, overrides `wait_interval` for that iteration.
///
/// Like [`await_terminal`], this enforces no iteration cap; the caller's
/// token bounds the wait.
pub async fn reboot_and_await<T>(
    client: &dyn SystemClient,
    config: &RebootConfig,
    wait_interval: Duration,
    tolerated: T,
    cancel: &CancellationToken,
) -> Result<RebootStatus, ClientError>
where
    T: Fn(&ClientError) -> bool,
{
    client.reboot(config).await?;
    info!(method = ?config.method, "reboot triggered, awaiting completion");

    await_terminal(
        cancel,
        || client.reboot_status(),
        |status: &RebootStatus| {
            if status.active {
                Verdict::NotYet(status.suggested_wait())
            } else {
                Verdict::Terminal
            }
        },
        wait_interval,
        tolerated,
    )
    .await
}
