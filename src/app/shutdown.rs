//! Cancellation wiring for the CLI.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` when Ctrl-C is received.
///
/// The fan-out stops between destinations or posts; the partial report is
/// still produced.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => {
                        log::warn!("Interrupt received, finishing current post and stopping");
                        cancel.cancel();
                    }
                    Err(e) => log::warn!("Failed to listen for Ctrl-C: {e}"),
                }
            }
            _ = cancel.cancelled() => {}
        }
    })
}

/// Stops the signal listener and waits for it.
pub async fn shutdown_gracefully(listener_cancel: CancellationToken, listener: JoinHandle<()>) {
    listener_cancel.cancel();
    let _ = listener.await;
}
