//! Pure view model of the availability grid.
//!
//! `GridModel::build` turns the persisted slots and the drag in progress into
//! a rows x days matrix that the egui widget paints without further lookups.

use chrono::{NaiveDate, NaiveTime};

use crate::models::gesture::DragGesture;
use crate::models::slot_key::SlotKey;
use crate::services::availability::PersistedSlots;
use crate::services::time_axis::TimeAxis;

/// State of one (day, time) cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub key: SlotKey,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Categories of the stored slot, empty when nothing is stored
    pub categories: Vec<String>,
    pub persisted: bool,
    /// Covered by the gesture in progress. Independent of `persisted`.
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub time: NaiveTime,
    pub label: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
}

impl GridModel {
    pub fn build(
        persisted: &PersistedSlots,
        gesture: Option<&DragGesture>,
        dates: &[NaiveDate],
        axis: &TimeAxis,
    ) -> Self {
        let rows = axis
            .times()
            .iter()
            .map(|time| GridRow {
                time: *time,
                label: time.format("%H:%M").to_string(),
                cells: dates
                    .iter()
                    .map(|date| {
                        let key = SlotKey::encode(*date, *time);
                        let stored = persisted.get(&key);
                        GridCell {
                            categories: stored.map(|s| s.categories.clone()).unwrap_or_default(),
                            persisted: stored.is_some(),
                            dragging: gesture.is_some_and(|g| g.contains(&key)),
                            date: *date,
                            time: *time,
                            key,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            dates: dates.to_vec(),
            rows,
        }
    }

    pub fn cell(&self, date: NaiveDate, time: NaiveTime) -> Option<&GridCell> {
        let column = self.dates.iter().position(|d| *d == date)?;
        self.rows
            .iter()
            .find(|row| row.time == time)
            .and_then(|row| row.cells.get(column))
    }
}
