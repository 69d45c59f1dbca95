//! Time axis generation for the availability grid.
//!
//! The grid has seven day columns starting at the week start and one row per
//! time label. With default settings the labels run from 09:00 to 17:30 in
//! 30 minute steps (18 rows).

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::settings::GridSettings;
use crate::models::slot_key::SlotKey;

pub const DAYS_PER_WEEK: usize = 7;

/// The seven calendar dates starting at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    std::array::from_fn(|offset| week_start + Duration::days(offset as i64))
}

/// Default time labels, 09:00 through 17:30 every 30 minutes.
pub fn time_labels() -> Vec<String> {
    TimeAxis::default().labels()
}

/// Ordered list of bucket start times for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxis {
    times: Vec<NaiveTime>,
}

impl Default for TimeAxis {
    fn default() -> Self {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        let end = NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default();
        Self::build(start, end, 30)
    }
}

impl TimeAxis {
    /// Build an axis from `start` to `end` inclusive, stepping by `step_minutes`.
    pub fn build(start: NaiveTime, end: NaiveTime, step_minutes: u32) -> Self {
        let step = Duration::minutes(step_minutes.max(1) as i64);
        let mut times = Vec::new();
        let mut current = start;

        while current <= end {
            times.push(current);
            let (next, wrapped) = current.overflowing_add_signed(step);
            if wrapped != 0 || next <= current {
                break;
            }
            current = next;
        }

        Self { times }
    }

    /// Axis described by persisted settings. Falls back to the default axis
    /// if the settings do not validate.
    pub fn from_settings(settings: &GridSettings) -> Self {
        if let Err(e) = settings.validate() {
            log::warn!("Invalid grid settings ({}), using default time axis", e);
            return Self::default();
        }

        match (settings.start_time(), settings.end_time()) {
            (Some(start), Some(end)) => Self::build(start, end, settings.slot_minutes),
            _ => Self::default(),
        }
    }

    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// `HH:MM` labels, in axis order.
    pub fn labels(&self) -> Vec<String> {
        self.times
            .iter()
            .map(|time| time.format("%H:%M").to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.times.binary_search(&time).is_ok()
    }

    /// Every slot key of `date`, in chronological order.
    pub fn keys_for_day(&self, date: NaiveDate) -> impl Iterator<Item = SlotKey> + '_ {
        self.times
            .iter()
            .map(move |time| SlotKey::encode(date, *time))
    }
}
