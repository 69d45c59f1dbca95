//! Drag gesture state for the availability grid.
//!
//! A gesture starts on pointer-down, grows while the pointer moves over cells
//! of the same day, and ends on pointer-up. It never spans more than one day.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::slot_key::SlotKey;

/// An in-progress drag over the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub anchor_key: SlotKey,
    pub anchor_day: NaiveDate,
    /// Keys currently spanned, kept sorted
    pub active_keys: BTreeSet<SlotKey>,
}

impl DragGesture {
    /// Gesture covering only the anchor cell.
    pub fn new(anchor_key: SlotKey, anchor_day: NaiveDate) -> Self {
        let mut active_keys = BTreeSet::new();
        active_keys.insert(anchor_key.clone());
        Self {
            anchor_key,
            anchor_day,
            active_keys,
        }
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.active_keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.active_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_keys.is_empty()
    }
}

/// State of the selection reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

impl SelectionState {
    pub fn gesture(&self) -> Option<&DragGesture> {
        match self {
            Self::Idle => None,
            Self::Dragging(gesture) => Some(gesture),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

/// Keys produced by a gesture that ended with pointer-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedGesture {
    pub day: NaiveDate,
    pub keys: BTreeSet<SlotKey>,
}
