// Property-based tests for the drag selection reducer
// Random pointer paths must always select a contiguous run on the anchor day

use availability_grid::models::gesture::SelectionState;
use availability_grid::models::slot_key::SlotKey;
use availability_grid::services::selection::{reduce, PointerEvent};
use availability_grid::services::time_axis::TimeAxis;
use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

fn slot(index: usize) -> NaiveTime {
    TimeAxis::default().times()[index]
}

proptest! {
    /// Property: after down at `a` and enter at `b` the selection is exactly
    /// the axis rows between them, inclusive
    #[test]
    fn prop_selection_is_inclusive_range(a in 0usize..18, b in 0usize..18) {
        let axis = TimeAxis::default();
        let (state, _) = reduce(
            SelectionState::Idle,
            PointerEvent::Down { day: monday(), time: slot(a) },
            &axis,
        );
        let (state, _) = reduce(
            state,
            PointerEvent::Enter { day: monday(), time: slot(b) },
            &axis,
        );

        let gesture = state.gesture().expect("still dragging");
        let (low, high) = (a.min(b), a.max(b));
        let expected: Vec<SlotKey> = (low..=high)
            .map(|i| SlotKey::encode(monday(), slot(i)))
            .collect();
        prop_assert_eq!(gesture.active_keys.iter().cloned().collect::<Vec<_>>(), expected);
    }

    /// Property: the last enter on the anchor day decides the range, and
    /// enters on other days change nothing
    #[test]
    fn prop_only_anchor_day_counts(
        anchor in 0usize..18,
        path in proptest::collection::vec((0i64..7, 0usize..18), 1..20),
    ) {
        let axis = TimeAxis::default();
        let (mut state, _) = reduce(
            SelectionState::Idle,
            PointerEvent::Down { day: monday(), time: slot(anchor) },
            &axis,
        );

        let mut last_same_day = anchor;
        for (day_offset, row) in &path {
            let day = monday() + Duration::days(*day_offset);
            state = reduce(state, PointerEvent::Enter { day, time: slot(*row) }, &axis).0;
            if *day_offset == 0 {
                last_same_day = *row;
            }
        }

        let (next, completed) = reduce(state, PointerEvent::Up, &axis);
        prop_assert_eq!(next, SelectionState::Idle);
        let completed = completed.expect("pointer up completes the gesture");
        prop_assert_eq!(completed.day, monday());
        prop_assert_eq!(completed.keys.len(), anchor.abs_diff(last_same_day) + 1);
        prop_assert!(completed.keys.contains(&SlotKey::encode(monday(), slot(anchor))));
    }

    /// Property: cancel always returns to idle without a completed gesture
    #[test]
    fn prop_cancel_discards(anchor in 0usize..18, current in 0usize..18) {
        let axis = TimeAxis::default();
        let (state, _) = reduce(
            SelectionState::Idle,
            PointerEvent::Down { day: monday(), time: slot(anchor) },
            &axis,
        );
        let (state, _) = reduce(state, PointerEvent::Enter { day: monday(), time: slot(current) }, &axis);
        let (state, completed) = reduce(state, PointerEvent::Cancel, &axis);
        prop_assert_eq!(state, SelectionState::Idle);
        prop_assert!(completed.is_none());
    }
}
