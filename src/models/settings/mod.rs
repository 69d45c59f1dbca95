// Grid settings model
// Persisted in the single-row settings table

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M";

/// Layout of the availability grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    pub id: Option<i64>,
    /// First time label on the axis ("HH:MM")
    pub day_start: String,
    /// Last time label on the axis, inclusive ("HH:MM")
    pub day_end: String,
    /// Minutes between two consecutive labels
    pub slot_minutes: u32,
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            id: Some(1),
            day_start: "09:00".to_string(),
            day_end: "17:30".to_string(),
            slot_minutes: 30,
            first_day_of_week: 1, // Monday
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let start = parse_time(&self.day_start)
            .ok_or_else(|| SettingsValidationError::InvalidTime(self.day_start.clone()))?;
        let end = parse_time(&self.day_end)
            .ok_or_else(|| SettingsValidationError::InvalidTime(self.day_end.clone()))?;

        if start >= end {
            return Err(SettingsValidationError::EmptyDay);
        }

        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(SettingsValidationError::InvalidSlotLength(self.slot_minutes));
        }

        if self.first_day_of_week > 6 {
            return Err(SettingsValidationError::InvalidFirstDay(self.first_day_of_week));
        }

        Ok(())
    }

    /// Parsed `day_start`, if valid.
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_time(&self.day_start)
    }

    /// Parsed `day_end`, if valid.
    pub fn end_time(&self) -> Option<NaiveTime> {
        parse_time(&self.day_end)
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    InvalidTime(String),
    EmptyDay,
    InvalidSlotLength(u32),
    InvalidFirstDay(u8),
}

impl std::fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTime(value) => write!(f, "Invalid time '{}' (use HH:MM)", value),
            Self::EmptyDay => write!(f, "Day start must be before day end"),
            Self::InvalidSlotLength(minutes) => {
                write!(f, "Slot length {} must be a divisor of 60", minutes)
            }
            Self::InvalidFirstDay(day) => write!(f, "First day of week {} is out of range", day),
        }
    }
}

impl std::error::Error for SettingsValidationError {}
