// Test fixtures - reusable test data
// Provides consistent dates, owners and databases across the integration tests

#![allow(dead_code)]

use availability_grid::services::database::Database;
use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;
use tempfile::TempDir;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday 6 May 2024, the start of a Monday-first week
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    /// Wednesday of the same week
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()
    }

    /// Sunday 5 May 2024, the start of the same week when Sunday comes first
    pub fn sunday_before() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 5).unwrap()
    }

    /// Thursday 29 Feb 2024 (leap day)
    pub fn leap_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    pub fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }
}

pub const OWNER: &str = "owner-1";
pub const OTHER_OWNER: &str = "owner-2";

/// A file-backed database in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct TempDatabase {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("availability.db");
        let fixture = Self { _dir: dir, path };
        fixture.open().initialize_schema().expect("Failed to initialize schema");
        fixture
    }

    /// A fresh connection to the same file.
    pub fn open(&self) -> Database {
        Database::new(self.path.to_str().unwrap()).expect("Failed to open database")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(dates::monday().weekday(), Weekday::Mon);
        assert_eq!(dates::wednesday().weekday(), Weekday::Wed);
        assert_eq!(dates::sunday_before().weekday(), Weekday::Sun);
        assert_eq!(dates::leap_day().day(), 29);
    }

    #[test]
    fn test_temp_database_is_initialized() {
        let db = TempDatabase::new();
        assert!(db.path.exists());
    }
}
