//! Scripted collaborators shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use crate::api::{ApiError, MakeApi};
use crate::render::Renderer;
use crate::session::CollegeId;
use crate::types::{InventoryItem, InventorySnapshot, StockLevel, StorageSnapshot, UserInfo};

// =============================================================================
// MockApi
// =============================================================================

/// `MakeApi` that replays queued responses and counts calls.
///
/// An exhausted queue answers with `ApiError::Request`.
#[derive(Default)]
pub struct MockApi {
    inventory: Mutex<VecDeque<Result<InventorySnapshot, ApiError>>>,
    storage: Mutex<VecDeque<Result<StorageSnapshot, ApiError>>>,
    user_info: Mutex<VecDeque<Result<UserInfo, ApiError>>>,
    inventory_gate: Option<Arc<Semaphore>>,
    pub inventory_calls: AtomicUsize,
    pub storage_calls: AtomicUsize,
    pub user_info_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every inventory fetch wait for a permit on `gate`.
    pub fn with_inventory_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.inventory_gate = Some(gate);
        self
    }

    pub fn push_inventory(&self, response: Result<InventorySnapshot, ApiError>) {
        self.inventory.lock().unwrap().push_back(response);
    }

    pub fn push_storage(&self, response: Result<StorageSnapshot, ApiError>) {
        self.storage.lock().unwrap().push_back(response);
    }

    pub fn push_user_info(&self, response: Result<UserInfo, ApiError>) {
        self.user_info.lock().unwrap().push_back(response);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Request("no scripted response".into())))
}

#[async_trait::async_trait]
impl MakeApi for MockApi {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, ApiError> {
        self.inventory_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.inventory_gate {
            gate.acquire().await.unwrap().forget();
        }
        next(&self.inventory)
    }

    async fn fetch_student_storage(&self, _college_id: &CollegeId) -> Result<StorageSnapshot, ApiError> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.storage)
    }

    async fn fetch_user_info(&self, _college_id: &CollegeId) -> Result<UserInfo, ApiError> {
        self.user_info_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.user_info)
    }
}

// =============================================================================
// RecordingRenderer
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    LoggedIn(String),
    LoggedOut,
    QuizInfo { has_user: bool },
    Checkouts { has_user: bool },
    Inventory(Vec<String>),
    Storage,
}

/// `Renderer` that records every call in order.
#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Item names from the most recent inventory render.
    pub fn last_inventory(&self) -> Option<Vec<String>> {
        self.events().into_iter().rev().find_map(|e| match e {
            RenderEvent::Inventory(names) => Some(names),
            _ => None,
        })
    }

    pub fn inventory_renders(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, RenderEvent::Inventory(_)))
            .count()
    }

    fn record(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Renderer for RecordingRenderer {
    fn display_logged_in(&self, college_id: &CollegeId) {
        self.record(RenderEvent::LoggedIn(college_id.to_string()));
    }

    fn display_logged_out(&self) {
        self.record(RenderEvent::LoggedOut);
    }

    fn render_quiz_info(&self, user: Option<&UserInfo>) {
        self.record(RenderEvent::QuizInfo { has_user: user.is_some() });
    }

    fn render_checkouts(&self, user: Option<&UserInfo>) {
        self.record(RenderEvent::Checkouts { has_user: user.is_some() });
    }

    fn render_inventory(&self, items: &[InventoryItem]) {
        self.record(RenderEvent::Inventory(items.iter().map(|i| i.name.clone()).collect()));
    }

    fn render_storage(&self, _storage: &StorageSnapshot) {
        self.record(RenderEvent::Storage);
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn item(name: &str, room: &str, material: &str, qty: u64) -> InventoryItem {
    InventoryItem {
        name: name.into(),
        room: room.into(),
        material: material.into(),
        quantity: StockLevel::Count(qty),
    }
}

/// Drill (out of stock, room A, Metal) and Saw (3 in stock, room B, Wood).
pub fn drill_and_saw() -> InventorySnapshot {
    InventorySnapshot::new(vec![item("Drill", "A", "Metal", 0), item("Saw", "B", "Wood", 3)])
}

pub fn college_id(raw: &str) -> CollegeId {
    CollegeId::parse(raw).unwrap()
}
