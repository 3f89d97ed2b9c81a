//! Rendering collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bootstrap, the pollers and the search controller only ever talk to the
//! `Renderer` trait. The binary plugs in `TerminalRenderer`; tests use a
//! recording implementation. All calls are synchronous and run to
//! completion, so a render never observes a half-applied refresh.

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::session::CollegeId;
use crate::types::{InventoryItem, StorageSnapshot, UserInfo};

/// Page-level views. Each call fully redraws its region and is safe to repeat.
pub trait Renderer: Send + Sync {
    fn display_logged_in(&self, college_id: &CollegeId);

    fn display_logged_out(&self);

    fn render_quiz_info(&self, user: Option<&UserInfo>);

    fn render_checkouts(&self, user: Option<&UserInfo>);

    fn render_inventory(&self, items: &[InventoryItem]);

    fn render_storage(&self, storage: &StorageSnapshot);
}

// =============================================================================
// TERMINAL RENDERER
// =============================================================================

/// Plain-text renderer over any writer (stdout in the binary).
pub struct TerminalRenderer<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Recover the writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "render write failed");
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn display_logged_in(&self, college_id: &CollegeId) {
        self.emit(&format!("Logged in as {college_id}\n"));
    }

    fn display_logged_out(&self) {
        self.emit("Not logged in\n");
    }

    fn render_quiz_info(&self, user: Option<&UserInfo>) {
        self.emit(&format_quiz_info(user));
    }

    fn render_checkouts(&self, user: Option<&UserInfo>) {
        self.emit(&format_checkouts(user));
    }

    fn render_inventory(&self, items: &[InventoryItem]) {
        self.emit(&format_inventory(items));
    }

    fn render_storage(&self, storage: &StorageSnapshot) {
        self.emit(&format_storage(storage));
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

fn format_quiz_info(user: Option<&UserInfo>) -> String {
    match user {
        None => "== Quizzes ==\n(log in to see quiz status)\n".to_owned(),
        Some(user) if user.passed_quizzes.is_empty() => "== Quizzes ==\nNo quizzes passed yet\n".to_owned(),
        Some(user) => {
            let mut text = String::from("== Quizzes ==\n");
            for quiz in &user.passed_quizzes {
                text.push_str(&format!("  [x] {quiz}\n"));
            }
            text
        }
    }
}

fn format_checkouts(user: Option<&UserInfo>) -> String {
    let Some(user) = user else {
        return "== Checkouts ==\n(log in to see checkouts)\n".to_owned();
    };
    if user.checkouts.is_empty() {
        return "== Checkouts ==\nNothing checked out\n".to_owned();
    }
    let mut text = String::from("== Checkouts ==\n");
    for checkout in &user.checkouts {
        text.push_str(&format!("  {} (due {})\n", checkout.items.join(", "), checkout.timestamp_due));
    }
    text
}

fn format_inventory(items: &[InventoryItem]) -> String {
    let mut text = format!("== Inventory ({} matching) ==\n", items.len());
    for item in items {
        text.push_str(&format!(
            "  {:<32} {:<12} {:<12} {}\n",
            item.name, item.room, item.material, item.quantity
        ));
    }
    text
}

fn format_storage(storage: &StorageSnapshot) -> String {
    if storage.is_empty() {
        return "== Storage ==\nNo storage allocated\n".to_owned();
    }
    format!("== Storage ==\n{}\n", storage.0)
}
