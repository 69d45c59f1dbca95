//! Persisted availability slot model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::slot_key::SlotKey;

/// Identity of the user who owns a set of slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single half-hour bucket of availability for one owner.
///
/// Slots do not model a duration: `end_time` always equals `start_time`
/// and the bucket is identified by its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Random UUID assigned on creation
    pub id: String,
    pub owner_id: OwnerId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Category labels in the order they were chosen
    pub categories: Vec<String>,
}

impl AvailabilitySlot {
    /// Create a fresh slot starting at `start_time`.
    pub fn new(owner_id: OwnerId, start_time: NaiveDateTime, categories: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            start_time,
            end_time: start_time,
            categories,
        }
    }

    /// Grid key for the bucket this slot occupies.
    pub fn key(&self) -> SlotKey {
        SlotKey::from_start_time(self.start_time)
    }
}
