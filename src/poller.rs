//! Inventory and storage pollers plus their recurring refresh tasks.
//!
//! DESIGN
//! ======
//! Each poller owns one `SnapshotCell`. A refresh fetches a complete value
//! and swaps it in only on success; on failure the previous snapshot stays
//! and the error is returned to the caller after being logged. Timer ticks
//! discard that error, so a failed fetch never stops later ticks.
//!
//! Refresh tasks are `ScheduledTask` handles: cancel explicitly, or drop the
//! handle to stop the timer.

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::{ApiError, MakeApi};
use crate::render::Renderer;
use crate::session::Session;
use crate::snapshot::SnapshotCell;
use crate::types::{InventorySnapshot, StorageSnapshot};

/// Period of both background refresh timers.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100_000);

/// Callback run after every successful inventory refresh.
pub type RefreshHook = Box<dyn Fn(&InventorySnapshot) + Send + Sync>;

// =============================================================================
// INVENTORY POLLER
// =============================================================================

#[derive(Clone)]
pub struct InventoryPoller {
    api: Arc<dyn MakeApi>,
    snapshot: SnapshotCell<InventorySnapshot>,
    hooks: Arc<Mutex<Vec<RefreshHook>>>,
}

impl InventoryPoller {
    #[must_use]
    pub fn new(api: Arc<dyn MakeApi>) -> Self {
        Self { api, snapshot: SnapshotCell::new(), hooks: Arc::new(Mutex::new(Vec::new())) }
    }

    #[must_use]
    pub fn snapshot(&self) -> &SnapshotCell<InventorySnapshot> {
        &self.snapshot
    }

    /// Register a hook for later successful refreshes.
    ///
    /// Hooks run synchronously inside `refresh` and must not register
    /// further hooks.
    pub fn on_refresh(&self, hook: RefreshHook) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    /// Fetch the inventory and replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot is left untouched.
    pub async fn refresh(&self) -> Result<Arc<InventorySnapshot>, ApiError> {
        match self.api.fetch_inventory().await {
            Ok(fresh) => {
                let snapshot = self.snapshot.replace(fresh);
                info!(items = snapshot.items.len(), last_updated = snapshot.last_updated, "inventory refreshed");
                let hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
                for hook in hooks.iter() {
                    hook(&snapshot);
                }
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, retryable = e.retryable(), "inventory refresh failed; keeping previous snapshot");
                Err(e)
            }
        }
    }
}

// =============================================================================
// STORAGE POLLER
// =============================================================================

#[derive(Clone)]
pub struct StoragePoller {
    api: Arc<dyn MakeApi>,
    session: Session,
    renderer: Arc<dyn Renderer>,
    snapshot: SnapshotCell<StorageSnapshot>,
}

impl StoragePoller {
    #[must_use]
    pub fn new(api: Arc<dyn MakeApi>, session: Session, renderer: Arc<dyn Renderer>) -> Self {
        Self { api, session, renderer, snapshot: SnapshotCell::new() }
    }

    #[must_use]
    pub fn snapshot(&self) -> &SnapshotCell<StorageSnapshot> {
        &self.snapshot
    }

    /// Fetch the student's storage allocation, store it, and render it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotLoggedIn` without a session, otherwise the fetch
    /// error. The previous snapshot is left untouched on any error.
    pub async fn refresh(&self) -> Result<Arc<StorageSnapshot>, ApiError> {
        let Some(college_id) = self.session.college_id() else {
            debug!("storage refresh skipped: no session");
            return Err(ApiError::NotLoggedIn);
        };
        match self.api.fetch_student_storage(college_id).await {
            Ok(fresh) => {
                let snapshot = self.snapshot.replace(fresh);
                info!(%college_id, "student storage refreshed");
                self.renderer.render_storage(&snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                warn!(%college_id, error = %e, retryable = e.retryable(), "storage refresh failed; keeping previous snapshot");
                Err(e)
            }
        }
    }
}

// =============================================================================
// SCHEDULED TASKS
// =============================================================================

/// Handle to a recurring background task. Dropping the handle cancels it.
pub struct ScheduledTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!(task = self.name, "cancelling scheduled task");
        }
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `tick` every `period`, starting one full period from now.
///
/// Ticks that fall behind are skipped rather than replayed in a burst.
pub fn spawn_refresh_task<F, Fut>(name: &'static str, period: Duration, tick: F) -> ScheduledTask
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    info!(task = name, period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX), "refresh timer registered");
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            debug!(task = name, "refresh timer fired");
            tick().await;
        }
    });
    ScheduledTask { name, handle }
}
