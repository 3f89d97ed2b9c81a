//! Page bootstrap: orders the session check, static renders, refresh timers,
//! first fetches and search wiring.
//!
//! DESIGN
//! ======
//! `Bootstrap::start` runs once and resolves to a `Portal` that owns every
//! live resource it created. The sequence is:
//!
//! 1. session present: render logged-in view, then fetch user info
//!    (failure is logged and rendering continues without it);
//!    session absent: render logged-out view
//! 2. render quiz info and checkouts
//! 3. register the inventory and storage refresh timers
//! 4. concurrently:
//!    - first inventory fetch; on success run the search once, then attach
//!      the control listeners and the post-refresh search hook
//!    - first storage fetch
//!
//! Listeners are attached only after a successful first inventory fetch. If
//! that fetch fails they are never attached for this portal.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. Each step's outcome is kept in the
//! `StartupReport` so callers and tests can inspect what happened.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::api::{ApiError, MakeApi};
use crate::controls::{ChangeCallback, ControlError, ControlId, FilterControls};
use crate::poller::{InventoryPoller, REFRESH_INTERVAL, ScheduledTask, StoragePoller, spawn_refresh_task};
use crate::render::Renderer;
use crate::search::SearchController;
use crate::session::Session;
use crate::types::UserInfo;

// =============================================================================
// REPORT
// =============================================================================

/// Outcome of each fallible bootstrap step.
#[derive(Debug)]
pub struct StartupReport {
    /// `None` when no session was present, so no fetch was made.
    pub user_info: Option<Result<UserInfo, ApiError>>,
    pub inventory: Result<(), ApiError>,
    pub storage: Result<(), ApiError>,
    /// Controls whose listener could not be attached.
    pub listener_errors: Vec<ControlError>,
    /// True once at least one control listener is live.
    pub listeners_attached: bool,
}

impl StartupReport {
    /// The user profile, if it was fetched successfully.
    #[must_use]
    pub fn user(&self) -> Option<&UserInfo> {
        self.user_info.as_ref().and_then(|r| r.as_ref().ok())
    }
}

// =============================================================================
// BOOTSTRAP
// =============================================================================

pub struct Bootstrap {
    session: Session,
    api: Arc<dyn MakeApi>,
    renderer: Arc<dyn Renderer>,
    controls: Arc<dyn FilterControls>,
    refresh_interval: Duration,
}

impl Bootstrap {
    #[must_use]
    pub fn new(
        session: Session,
        api: Arc<dyn MakeApi>,
        renderer: Arc<dyn Renderer>,
        controls: Arc<dyn FilterControls>,
    ) -> Self {
        Self { session, api, renderer, controls, refresh_interval: REFRESH_INTERVAL }
    }

    /// Run the bootstrap sequence and hand back the live portal.
    pub async fn start(self) -> Portal {
        let user_info = self.resolve_session().await;
        let user = user_info.as_ref().and_then(|r| r.as_ref().ok());
        self.renderer.render_quiz_info(user);
        self.renderer.render_checkouts(user);

        let inventory = InventoryPoller::new(Arc::clone(&self.api));
        let storage = StoragePoller::new(Arc::clone(&self.api), self.session.clone(), Arc::clone(&self.renderer));
        let search = SearchController::new(
            Arc::clone(&self.controls),
            inventory.snapshot().clone(),
            Arc::clone(&self.renderer),
        );

        let timers = vec![
            spawn_refresh_task("inventory", self.refresh_interval, {
                let inventory = inventory.clone();
                move || {
                    let inventory = inventory.clone();
                    async move {
                        let _ = inventory.refresh().await;
                    }
                }
            }),
            spawn_refresh_task("storage", self.refresh_interval, {
                let storage = storage.clone();
                move || {
                    let storage = storage.clone();
                    async move {
                        let _ = storage.refresh().await;
                    }
                }
            }),
        ];

        let (first_inventory, first_storage) =
            tokio::join!(self.first_inventory(&inventory, &search), storage.refresh());
        let (inventory_result, listener_errors, listeners_attached) = first_inventory;

        let report = StartupReport {
            user_info,
            inventory: inventory_result,
            storage: first_storage.map(|_| ()),
            listener_errors,
            listeners_attached,
        };
        info!(
            logged_in = self.session.is_authenticated(),
            inventory_ok = report.inventory.is_ok(),
            storage_ok = report.storage.is_ok(),
            listeners_attached = report.listeners_attached,
            "portal started"
        );

        Portal { inventory, search, report, timers }
    }

    async fn resolve_session(&self) -> Option<Result<UserInfo, ApiError>> {
        let Some(college_id) = self.session.college_id() else {
            self.renderer.display_logged_out();
            return None;
        };
        self.renderer.display_logged_in(college_id);
        let result = self.api.fetch_user_info(college_id).await;
        if let Err(e) = &result {
            warn!(%college_id, error = %e, "user info fetch failed; rendering without profile");
        }
        Some(result)
    }

    /// First inventory fetch, then the initial search and listener wiring.
    async fn first_inventory(
        &self,
        inventory: &InventoryPoller,
        search: &SearchController,
    ) -> (Result<(), ApiError>, Vec<ControlError>, bool) {
        if let Err(e) = inventory.refresh().await {
            warn!(error = %e, "initial inventory fetch failed; search listeners not attached");
            return (Err(e), Vec::new(), false);
        }

        search.submit();

        let callback: ChangeCallback = {
            let search = search.clone();
            Arc::new(move || {
                search.submit();
            })
        };
        let listener_errors = self.controls.on_any_change(callback);
        for e in &listener_errors {
            error!(error = %e, "search listener not attached");
        }

        let hook_search = search.clone();
        inventory.on_refresh(Box::new(move |_| {
            hook_search.submit();
        }));

        let attached = listener_errors.len() < ControlId::ALL.len();
        (Ok(()), listener_errors, attached)
    }
}

// =============================================================================
// PORTAL
// =============================================================================

/// A started portal. Dropping it cancels the refresh timers.
pub struct Portal {
    inventory: InventoryPoller,
    search: SearchController,
    report: StartupReport,
    timers: Vec<ScheduledTask>,
}

impl Portal {
    #[must_use]
    pub fn report(&self) -> &StartupReport {
        &self.report
    }

    #[must_use]
    pub fn inventory(&self) -> &InventoryPoller {
        &self.inventory
    }

    #[must_use]
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    #[must_use]
    pub fn timers(&self) -> &[ScheduledTask] {
        &self.timers
    }

    /// On-demand inventory refresh outside the timer.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the displayed view is left unchanged.
    pub async fn refresh_inventory(&self) -> Result<(), ApiError> {
        self.inventory.refresh().await.map(|_| ())
    }

    /// Cancel both refresh timers.
    pub fn shutdown(self) {
        for timer in &self.timers {
            timer.cancel();
        }
        info!("portal shut down");
    }
}
