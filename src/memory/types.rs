//! Core memory type definitions.
//!
//! [`Memory`] is the stored record, [`MemorySummary`] its list-view projection and
//! [`MemoryDraft`] the validated user-supplied fields shared by create and update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A memory record, matching the `memories` table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// UUID v4 primary key.
    pub id: String,
    pub content: String,
    /// Link to an externally hosted cover image.
    pub cover_url: String,
    pub is_public: bool,
    /// Subject of the user who created the memory. Never changes.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Memory {
    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.user_id == caller
    }

    /// Public memories are readable by anyone; private ones only by their owner.
    pub fn is_readable_by(&self, caller: &str) -> bool {
        self.is_public || self.is_owned_by(caller)
    }
}

/// The list-view projection of a memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: String,
    pub cover_url: String,
    pub excerpt: String,
}

/// Caller-controlled fields of a memory. Updates replace all three at once.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDraft {
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
}
