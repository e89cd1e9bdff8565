use crate::controller::Controller;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::warn;

/// The service needs a moment to settle after a media key, and one
/// physical press can fire several key events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces bursts of refresh triggers into a single delayed fetch.
///
/// The one pending timer is the only state shared between trigger sources;
/// the lock makes cancel-plus-rearm atomic, so concurrent triggers can
/// never leave two timers armed.
pub struct RefreshCoordinator {
    controller: Arc<Controller>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshCoordinator {
    pub fn new(controller: Arc<Controller>) -> Self {
        Self {
            controller,
            pending: Mutex::new(None),
        }
    }

    /// Arms a one-shot fetch-and-display `delay` from now, replacing any
    /// timer still pending. An already-running fetch is past cancelling
    /// and will finish on its own.
    pub async fn trigger(&self, delay: Duration) {
        let mut pending = self.pending.lock().await;

        if let Some(armed) = pending.take() {
            armed.abort();
        }

        let controller = self.controller.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // the fetch runs detached: only the timer is abortable, a
            // cycle that has started always finishes on its own
            tokio::spawn(async move {
                if let Err(error) = controller.refresh_now().await {
                    // next trigger retries fresh
                    warn!(%error, "coalesced refresh failed");
                }
            });
        }));
    }
}
