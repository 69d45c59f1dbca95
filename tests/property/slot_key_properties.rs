// Property-based tests for slot key encoding
// Keys must survive a decode for every date and time the grid can produce

use availability_grid::models::slot_key::{SlotKey, SlotKeyError};
use availability_grid::services::time_axis::{week_dates, TimeAxis};
use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 through roughly 2099
    (0i64..36_500).prop_map(|offset| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset))
}

fn any_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

proptest! {
    /// Property: decode(encode(date, time)) gives back the same date and time
    #[test]
    fn prop_decode_inverts_encode(date in any_date(), time in any_time()) {
        let key = SlotKey::encode(date, time);
        prop_assert_eq!(SlotKey::decode(key.as_str()), Ok((date, time)));
    }

    /// Property: key order matches chronological order
    #[test]
    fn prop_key_order_is_chronological(
        a in (any_date(), any_time()),
        b in (any_date(), any_time()),
    ) {
        let key_a = SlotKey::encode(a.0, a.1);
        let key_b = SlotKey::encode(b.0, b.1);
        prop_assert_eq!(key_a.cmp(&key_b), a.0.and_time(a.1).cmp(&b.0.and_time(b.1)));
    }

    /// Property: every key on the default grid is unique and decodes
    #[test]
    fn prop_week_grid_keys_are_distinct(week_start in any_date()) {
        let axis = TimeAxis::default();
        let mut keys = std::collections::BTreeSet::new();
        for date in week_dates(week_start) {
            for key in axis.keys_for_day(date) {
                prop_assert!(key.parts().is_ok());
                keys.insert(key);
            }
        }
        prop_assert_eq!(keys.len(), 7 * 18);
    }

    /// Property: strings that are not four dash-separated parts never decode
    #[test]
    fn prop_wrong_part_count_is_malformed(raw in "[0-9:]{0,12}(-[0-9:]{0,6}){0,2}") {
        prop_assert_eq!(
            SlotKey::decode(&raw),
            Err(SlotKeyError::MalformedKey(raw.clone()))
        );
    }
}
