//! Slot keys identify a single half-hour bucket on the availability grid.
//!
//! A key is the ISO date followed by the time-of-day label, joined with `-`
//! (e.g. `2024-05-06-09:30`). Because both parts are zero padded, comparing
//! two keys of the same day as strings gives the same answer as comparing
//! them chronologically. The selection reducer relies on that.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// `YYYY-MM-DD-HH:MM` splits into exactly four dash separated parts.
const KEY_PARTS: usize = 4;

/// Stable identifier for a (date, time) cell on the grid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(String);

impl SlotKey {
    /// Build the key for a date and time of day.
    pub fn encode(date: NaiveDate, time: NaiveTime) -> Self {
        Self(format!(
            "{}-{}",
            date.format(DATE_FORMAT),
            time.format(TIME_FORMAT)
        ))
    }

    /// Key for the bucket starting at `start`.
    pub fn from_start_time(start: NaiveDateTime) -> Self {
        Self::encode(start.date(), start.time())
    }

    /// Split a raw key back into its date and time.
    pub fn decode(raw: &str) -> Result<(NaiveDate, NaiveTime), SlotKeyError> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != KEY_PARTS {
            return Err(SlotKeyError::MalformedKey(raw.to_string()));
        }

        let date_part = format!("{}-{}-{}", parts[0], parts[1], parts[2]);
        let date = NaiveDate::parse_from_str(&date_part, DATE_FORMAT)
            .map_err(|_| SlotKeyError::MalformedKey(raw.to_string()))?;
        let time = NaiveTime::parse_from_str(parts[3], TIME_FORMAT)
            .map_err(|_| SlotKeyError::MalformedKey(raw.to_string()))?;

        Ok((date, time))
    }

    /// Wrap a raw string after checking that it decodes.
    pub fn parse(raw: &str) -> Result<Self, SlotKeyError> {
        let (date, time) = Self::decode(raw)?;
        Ok(Self::encode(date, time))
    }

    /// Decode this key into its date and time.
    pub fn parts(&self) -> Result<(NaiveDate, NaiveTime), SlotKeyError> {
        Self::decode(&self.0)
    }

    /// Start of the bucket this key names.
    pub fn start_time(&self) -> Result<NaiveDateTime, SlotKeyError> {
        let (date, time) = self.parts()?;
        Ok(date.and_time(time))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SlotKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors produced while decoding a slot key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKeyError {
    MalformedKey(String),
}

impl fmt::Display for SlotKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedKey(raw) => write!(f, "Malformed slot key '{}'", raw),
        }
    }
}

impl std::error::Error for SlotKeyError {}
