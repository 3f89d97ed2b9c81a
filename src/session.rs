//! Login session for the current visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is resolved before bootstrap (from the CLI or an embedding
//! host) and handed in by value. Nothing here mutates it.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt;

/// A college identifier such as `"S123"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollegeId(String);

impl CollegeId {
    /// Wrap a raw identifier. Blank input yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollegeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only identity context for one page load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    college_id: Option<CollegeId>,
}

impl Session {
    #[must_use]
    pub fn logged_in(college_id: CollegeId) -> Self {
        Self { college_id: Some(college_id) }
    }

    #[must_use]
    pub fn logged_out() -> Self {
        Self { college_id: None }
    }

    /// Build from an optional raw identifier; blank counts as absent.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self { college_id: raw.and_then(CollegeId::parse) }
    }

    #[must_use]
    pub fn college_id(&self) -> Option<&CollegeId> {
        self.college_id.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.college_id.is_some()
    }
}
