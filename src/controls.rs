//! Filter-control capability consumed by the search controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The search controller reads four controls (free-text query, in-stock
//! toggle, room selector, material selector) through `FilterControls` and
//! registers change callbacks on them. `ControlPanel` is the in-memory
//! implementation the terminal client drives from stdin.

#[cfg(test)]
#[path = "controls_test.rs"]
mod tests;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Selector value meaning "no restriction".
pub const ANY: &str = "any";

/// Callback fired when a control's value changes.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// CONTROL IDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    SearchInput,
    InStockToggle,
    RoomSelect,
    MaterialSelect,
}

impl ControlId {
    pub const ALL: [ControlId; 4] = [Self::SearchInput, Self::InStockToggle, Self::RoomSelect, Self::MaterialSelect];

    /// Stable element identifier.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::SearchInput => "inventory-search-input",
            Self::InStockToggle => "inventory-in-stock",
            Self::RoomSelect => "room-select",
            Self::MaterialSelect => "tool-material-select",
        }
    }

    /// Event that signals a new value: every keystroke for the text input,
    /// a committed change for the others.
    #[must_use]
    pub fn trigger(self) -> &'static str {
        match self {
            Self::SearchInput => "keyup",
            Self::InStockToggle | Self::RoomSelect | Self::MaterialSelect => "change",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("control element `{0}` not found")]
    Missing(ControlId),
}

// =============================================================================
// TRAIT
// =============================================================================

pub trait FilterControls: Send + Sync {
    fn query(&self) -> String;

    fn in_stock_only(&self) -> bool;

    /// Raw room selector value; `"any"` means unrestricted.
    fn room(&self) -> String;

    /// Raw material selector value; `"any"` means unrestricted.
    fn material(&self) -> String;

    /// Attach `callback` to one control's change trigger.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::Missing` if the control does not exist.
    fn listen(&self, control: ControlId, callback: ChangeCallback) -> Result<(), ControlError>;

    /// Attach `callback` to all four controls. A missing control only skips
    /// its own attachment; the errors are returned for the caller to report.
    fn on_any_change(&self, callback: ChangeCallback) -> Vec<ControlError> {
        ControlId::ALL
            .into_iter()
            .filter_map(|control| self.listen(control, Arc::clone(&callback)).err())
            .collect()
    }
}

// =============================================================================
// CONTROL PANEL
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
struct ControlValues {
    query: String,
    in_stock_only: bool,
    room: String,
    material: String,
}

impl Default for ControlValues {
    fn default() -> Self {
        Self { query: String::new(), in_stock_only: false, room: ANY.to_owned(), material: ANY.to_owned() }
    }
}

/// In-memory control set. Setters update the value, then fire the control's
/// listeners outside the lock so a listener may read the panel.
pub struct ControlPanel {
    values: Mutex<ControlValues>,
    present: HashSet<ControlId>,
    listeners: Mutex<Vec<(ControlId, ChangeCallback)>>,
}

impl ControlPanel {
    /// A panel with all four controls at their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_controls(&ControlId::ALL)
    }

    /// A panel exposing only `controls`; listening on any other fails.
    #[must_use]
    pub fn with_controls(controls: &[ControlId]) -> Self {
        Self {
            values: Mutex::new(ControlValues::default()),
            present: controls.iter().copied().collect(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn set_query(&self, query: &str) {
        self.update(ControlId::SearchInput, |v| v.query = query.to_owned());
    }

    pub fn set_in_stock_only(&self, in_stock_only: bool) {
        self.update(ControlId::InStockToggle, |v| v.in_stock_only = in_stock_only);
    }

    pub fn set_room(&self, room: &str) {
        self.update(ControlId::RoomSelect, |v| v.room = room.to_owned());
    }

    pub fn set_material(&self, material: &str) {
        self.update(ControlId::MaterialSelect, |v| v.material = material.to_owned());
    }

    /// Number of attached listeners across all controls.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn update(&self, control: ControlId, apply: impl FnOnce(&mut ControlValues)) {
        apply(&mut *self.values.lock().unwrap_or_else(PoisonError::into_inner));
        let callbacks: Vec<ChangeCallback> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(id, _)| *id == control)
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        tracing::debug!(control = %control, trigger = control.trigger(), listeners = callbacks.len(), "control changed");
        for callback in callbacks {
            callback();
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ControlValues) -> T) -> T {
        f(&*self.values.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterControls for ControlPanel {
    fn query(&self) -> String {
        self.read(|v| v.query.clone())
    }

    fn in_stock_only(&self) -> bool {
        self.read(|v| v.in_stock_only)
    }

    fn room(&self) -> String {
        self.read(|v| v.room.clone())
    }

    fn material(&self) -> String {
        self.read(|v| v.material.clone())
    }

    fn listen(&self, control: ControlId, callback: ChangeCallback) -> Result<(), ControlError> {
        if !self.present.contains(&control) {
            return Err(ControlError::Missing(control));
        }
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((control, callback));
        Ok(())
    }
}
