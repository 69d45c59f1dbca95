// Date utility functions

use chrono::{Datelike, Duration, NaiveDate};

/// Snap `date` back to the most recent `first_day_of_week`
/// (0 = Sunday .. 6 = Saturday).
pub fn start_of_week(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let first = (first_day_of_week % 7) as i64;
    let offset = (weekday - first).rem_euclid(7);
    date - Duration::days(offset)
}

/// Exclusive upper bound of the week starting at `week_start`.
pub fn end_of_week_exclusive(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-05-08 is a Wednesday
    #[test_case(1, date(2024, 5, 6) ; "monday start")]
    #[test_case(0, date(2024, 5, 5) ; "sunday start")]
    #[test_case(3, date(2024, 5, 8) ; "same day")]
    #[test_case(4, date(2024, 5, 2) ; "thursday start wraps back")]
    fn test_start_of_week(first_day: u8, expected: NaiveDate) {
        assert_eq!(start_of_week(date(2024, 5, 8), first_day), expected);
    }

    #[test]
    fn test_end_of_week_exclusive() {
        assert_eq!(end_of_week_exclusive(date(2024, 12, 30)), date(2025, 1, 6));
    }
}
