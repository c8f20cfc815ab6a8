//! Ctrl-C handling.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on the first Ctrl-C.
///
/// The batch scheduler checks the token before each group, so lookups already
/// in flight finish and the partial result is reported.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    info!("Interrupt received, finishing in-flight lookups");
                    cancel.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            },
            _ = cancel.cancelled() => {}
        }
    })
}
