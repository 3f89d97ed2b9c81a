//! Inventory search: filter criteria and the controller that applies them.
//!
//! DESIGN
//! ======
//! `FilterCriteria` is rebuilt from the controls on every run and never
//! cached. `SearchController::submit` reads the latest snapshot and the
//! current control values, filters, and renders, all without yielding. The
//! rendered list is therefore a pure function of those two inputs, and when
//! several triggers race the last run to finish decides what is shown.

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;

use std::sync::Arc;

use tracing::debug;

use crate::controls::{ANY, FilterControls};
use crate::render::Renderer;
use crate::snapshot::SnapshotCell;
use crate::types::{InventoryItem, InventorySnapshot};

// =============================================================================
// CRITERIA
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub in_stock_only: bool,
    /// `None` matches every room.
    pub room: Option<String>,
    /// `None` matches every material.
    pub material: Option<String>,
}

impl FilterCriteria {
    /// Read the current control values.
    pub fn from_controls(controls: &dyn FilterControls) -> Self {
        Self {
            query: controls.query(),
            in_stock_only: controls.in_stock_only(),
            room: selection(&controls.room()),
            material: selection(&controls.material()),
        }
    }

    /// All four predicates must hold.
    #[must_use]
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let query_ok =
            self.query.is_empty() || item.name.to_lowercase().contains(&self.query.to_lowercase());
        let stock_ok = !self.in_stock_only || item.quantity.in_stock();
        let room_ok = self.room.as_ref().map_or(true, |room| item.room == *room);
        let material_ok = self
            .material
            .as_ref()
            .map_or(true, |material| item.material == *material);
        query_ok && stock_ok && room_ok && material_ok
    }

    /// Matching items in snapshot order.
    #[must_use]
    pub fn apply(&self, snapshot: &InventorySnapshot) -> Vec<InventoryItem> {
        snapshot
            .items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Map a selector value to a restriction; `"any"` and blank mean none.
fn selection(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ANY) {
        None
    } else {
        Some(value.to_owned())
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Clone)]
pub struct SearchController {
    controls: Arc<dyn FilterControls>,
    inventory: SnapshotCell<InventorySnapshot>,
    renderer: Arc<dyn Renderer>,
}

impl SearchController {
    #[must_use]
    pub fn new(
        controls: Arc<dyn FilterControls>,
        inventory: SnapshotCell<InventorySnapshot>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self { controls, inventory, renderer }
    }

    /// Filter the latest snapshot by the current controls and render it.
    ///
    /// Before any snapshot exists this renders an empty list.
    pub fn submit(&self) -> Vec<InventoryItem> {
        let criteria = FilterCriteria::from_controls(self.controls.as_ref());
        let results = self
            .inventory
            .latest()
            .map(|snapshot| criteria.apply(&snapshot))
            .unwrap_or_default();
        debug!(
            query = %criteria.query,
            in_stock_only = criteria.in_stock_only,
            room = criteria.room.as_deref().unwrap_or(ANY),
            material = criteria.material.as_deref().unwrap_or(ANY),
            results = results.len(),
            "search submitted"
        );
        self.renderer.render_inventory(&results);
        results
    }
}
