use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Cooperative cancellation token
///
/// A thread-safe single boolean cell, cloned into every category run. Setting
/// it is idempotent; paginators observe it only at round boundaries and the
/// orchestrator between category launches, so fetches already in flight
/// always finish and their data is kept.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Spawns the interrupt listener, the sole writer of the cancellation flag
///
/// Waits for ctrl-c and sets the token. The crawl keeps running until each
/// category reaches its next round boundary; nothing is aborted mid-flight.
pub fn spawn_cancel_listener(token: CancelToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing in-flight rounds and writing results");
            token.cancel();
        }
    })
}
