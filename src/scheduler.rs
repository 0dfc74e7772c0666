//! Periodic background consolidation.
//!
//! [`ConsolidationScheduler`] runs [`MemoryStore::consolidate`](crate::memory::MemoryStore::consolidate)
//! on a tokio interval, taking the store's mutex for the duration of each pass.
//! Shutdown stops the timer and waits for an in-flight pass to finish.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::memory::{lock_store, SharedStore};

pub struct ConsolidationScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
    passes: Arc<AtomicU64>,
}

impl ConsolidationScheduler {
    /// Spawn the background task. The first pass runs one full `period` after start.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(store: SharedStore, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let passes = Arc::new(AtomicU64::new(0));
        let pass_counter = Arc::clone(&passes);
        let period = period.max(Duration::from_millis(1));

        info!(interval_ms = period.as_millis() as u64, "starting consolidation scheduler");

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = lock_store(&store).consolidate();
                        let n = pass_counter.fetch_add(1, Ordering::Relaxed) + 1;
                        debug!(pass = n, promoted = report.promoted, archived = report.archived, "scheduled consolidation");
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            debug!("consolidation scheduler loop exited");
        });

        Self {
            shutdown,
            handle,
            passes,
        }
    }

    /// Number of completed consolidation passes.
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    /// Stop the timer and wait for the task to exit.
    pub async fn shutdown(self) {
        info!("stopping consolidation scheduler");
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "consolidation scheduler task failed");
        }
    }
}
