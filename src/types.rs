//! Wire DTOs shared with the MAKE server.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads. Inventory rows decode
//! through a raw record that accepts the server's column names and derives
//! the material label from its tool/material flags, so the same struct reads
//! both the compact form and the server's inventory record.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// INVENTORY
// =============================================================================

/// How much of an item is on hand.
///
/// The server encodes this as a single integer: non-negative values are exact
/// counts, `-1`/`-2`/`-3` are the qualitative levels used for consumables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum StockLevel {
    Count(u64),
    Low,
    Medium,
    High,
}

impl StockLevel {
    /// Whether at least some of the item is available.
    #[must_use]
    pub fn in_stock(self) -> bool {
        match self {
            Self::Count(n) => n > 0,
            Self::Low | Self::Medium | Self::High => true,
        }
    }
}

impl From<i64> for StockLevel {
    fn from(raw: i64) -> Self {
        match raw {
            -1 => Self::Low,
            -2 => Self::Medium,
            -3 => Self::High,
            n => Self::Count(u64::try_from(n).unwrap_or(0)),
        }
    }
}

impl From<StockLevel> for i64 {
    fn from(level: StockLevel) -> Self {
        match level {
            StockLevel::Count(n) => i64::try_from(n).unwrap_or(i64::MAX),
            StockLevel::Low => -1,
            StockLevel::Medium => -2,
            StockLevel::High => -3,
        }
    }
}

impl Default for StockLevel {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Material selector value for items the server flags `is_material`.
pub const MATERIAL: &str = "Material";
/// Material selector value for items the server flags `is_tool`.
pub const TOOL: &str = "Tool";

/// A single inventory row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInventoryItem")]
pub struct InventoryItem {
    pub name: String,
    pub room: String,
    /// `"Tool"`, `"Material"`, an explicit label, or empty when unknown.
    pub material: String,
    pub quantity: StockLevel,
}

/// Inventory record as either the server or a compact feed sends it.
///
/// The server has no `material` column; it flags items with `is_tool` and
/// `is_material` instead. An explicit `material` wins, then `is_tool`, then
/// `is_material`.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawInventoryItem {
    name: String,
    #[serde(alias = "location_room")]
    room: String,
    material: Option<String>,
    is_material: bool,
    is_tool: bool,
    #[serde(alias = "quantity_in_stock")]
    quantity: StockLevel,
}

impl From<RawInventoryItem> for InventoryItem {
    fn from(raw: RawInventoryItem) -> Self {
        let material = match raw.material {
            Some(label) => label,
            None if raw.is_tool => TOOL.to_owned(),
            None if raw.is_material => MATERIAL.to_owned(),
            None => String::new(),
        };
        Self { name: raw.name, room: raw.room, material, quantity: raw.quantity }
    }
}

/// The full inventory as served by the MAKE server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    /// Unix seconds of the server's last inventory sync.
    pub last_updated: u64,
    pub items: Vec<InventoryItem>,
}

impl InventorySnapshot {
    #[must_use]
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { last_updated: 0, items }
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// The current student's storage allocation, kept as the server sent it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageSnapshot(pub serde_json::Value);

impl StorageSnapshot {
    /// True when the server reported no allocation for this student.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Array(slots) => slots.is_empty(),
            serde_json::Value::Object(fields) => fields.is_empty(),
            _ => false,
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

/// A tool checkout held by the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkout {
    /// Names of the checked-out items.
    pub items: Vec<String>,
    /// Unix seconds when the items were checked out.
    pub timestamp_out: u64,
    /// Unix seconds when the items are due back.
    pub timestamp_due: u64,
}

/// Profile of the logged-in user as returned by the user-info endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub name: String,
    /// The server sends this as a number; older feeds send a string.
    #[serde(deserialize_with = "college_id_text")]
    pub college_id: String,
    pub college_email: String,
    pub passed_quizzes: Vec<String>,
    pub auth_level: String,
    pub checkouts: Vec<Checkout>,
}

fn college_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(id)) => id.to_string(),
        Some(NumberOrText::Text(id)) => id,
        None => String::new(),
    })
}
