//! Selection reducer for drag-to-select on the availability grid.
//!
//! Transitions are pure: `reduce` takes the current state and a pointer event
//! and returns the next state plus, on pointer-up, the completed gesture.
//! `SelectionReducer` wraps that in a small stateful helper for the board.

use chrono::{NaiveDate, NaiveTime};

use crate::models::gesture::{CompletedGesture, DragGesture, SelectionState};
use crate::models::slot_key::SlotKey;
use crate::services::time_axis::TimeAxis;

/// Pointer input delivered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { day: NaiveDate, time: NaiveTime },
    Enter { day: NaiveDate, time: NaiveTime },
    Up,
    /// Pointer released outside any tracked cell
    Cancel,
}

/// Apply one pointer event to `state`.
pub fn reduce(
    state: SelectionState,
    event: PointerEvent,
    axis: &TimeAxis,
) -> (SelectionState, Option<CompletedGesture>) {
    match (state, event) {
        (_, PointerEvent::Down { day, time }) => {
            let anchor = SlotKey::encode(day, time);
            log::debug!("Gesture started at {}", anchor);
            (SelectionState::Dragging(DragGesture::new(anchor, day)), None)
        }
        (SelectionState::Dragging(gesture), PointerEvent::Enter { day, time }) => {
            if day != gesture.anchor_day {
                return (SelectionState::Dragging(gesture), None);
            }
            (SelectionState::Dragging(extend(gesture, time, axis)), None)
        }
        (SelectionState::Dragging(gesture), PointerEvent::Up) => {
            log::debug!(
                "Gesture on {} finished with {} slot(s)",
                gesture.anchor_day,
                gesture.active_keys.len()
            );
            let completed = CompletedGesture {
                day: gesture.anchor_day,
                keys: gesture.active_keys,
            };
            (SelectionState::Idle, Some(completed))
        }
        (SelectionState::Dragging(gesture), PointerEvent::Cancel) => {
            log::debug!("Gesture on {} abandoned", gesture.anchor_day);
            (SelectionState::Idle, None)
        }
        (SelectionState::Idle, _) => (SelectionState::Idle, None),
    }
}

/// Recompute the span from the anchor to the cell at `time` on the anchor day.
fn extend(mut gesture: DragGesture, time: NaiveTime, axis: &TimeAxis) -> DragGesture {
    let current = SlotKey::encode(gesture.anchor_day, time);
    let (low, high) = if current < gesture.anchor_key {
        (current, gesture.anchor_key.clone())
    } else {
        (gesture.anchor_key.clone(), current)
    };

    let mut active: std::collections::BTreeSet<SlotKey> = axis
        .keys_for_day(gesture.anchor_day)
        .filter(|key| *key >= low && *key <= high)
        .collect();
    // The anchor stays selected even if it is not on the axis.
    active.insert(gesture.anchor_key.clone());

    gesture.active_keys = active;
    gesture
}

/// Stateful wrapper used by the board and the grid widget.
#[derive(Debug, Clone)]
pub struct SelectionReducer {
    axis: TimeAxis,
    state: SelectionState,
}

impl SelectionReducer {
    pub fn new(axis: TimeAxis) -> Self {
        Self {
            axis,
            state: SelectionState::Idle,
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Replace the axis, dropping any gesture in progress.
    pub fn set_axis(&mut self, axis: TimeAxis) {
        self.axis = axis;
        self.state = SelectionState::Idle;
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.state.gesture()
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> Option<CompletedGesture> {
        let state = std::mem::take(&mut self.state);
        let (next, completed) = reduce(state, event, &self.axis);
        self.state = next;
        completed
    }

    pub fn pointer_down(&mut self, day: NaiveDate, time: NaiveTime) {
        self.dispatch(PointerEvent::Down { day, time });
    }

    pub fn pointer_enter(&mut self, day: NaiveDate, time: NaiveTime) {
        self.dispatch(PointerEvent::Enter { day, time });
    }

    pub fn pointer_up(&mut self) -> Option<CompletedGesture> {
        self.dispatch(PointerEvent::Up)
    }

    pub fn cancel(&mut self) {
        self.dispatch(PointerEvent::Cancel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn keys(gesture: &DragGesture) -> Vec<&str> {
        gesture.active_keys.iter().map(SlotKey::as_str).collect()
    }

    #[test]
    fn test_pointer_down_selects_anchor() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(10, 0));

        let gesture = reducer.gesture().unwrap();
        assert_eq!(gesture.anchor_key.as_str(), "2024-05-06-10:00");
        assert_eq!(gesture.anchor_day, monday());
        assert_eq!(keys(gesture), vec!["2024-05-06-10:00"]);
    }

    #[test]
    fn test_drag_down_selects_range() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(10, 0));
        reducer.pointer_enter(monday(), at(10, 30));
        reducer.pointer_enter(monday(), at(11, 0));

        assert_eq!(
            keys(reducer.gesture().unwrap()),
            vec!["2024-05-06-10:00", "2024-05-06-10:30", "2024-05-06-11:00"]
        );
    }

    #[test]
    fn test_drag_up_selects_range_above_anchor() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(11, 0));
        reducer.pointer_enter(monday(), at(10, 0));

        assert_eq!(
            keys(reducer.gesture().unwrap()),
            vec!["2024-05-06-10:00", "2024-05-06-10:30", "2024-05-06-11:00"]
        );
    }

    #[test]
    fn test_range_shrinks_when_pointer_moves_back() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(9, 0));
        reducer.pointer_enter(monday(), at(12, 0));
        reducer.pointer_enter(monday(), at(9, 30));

        assert_eq!(
            keys(reducer.gesture().unwrap()),
            vec!["2024-05-06-09:00", "2024-05-06-09:30"]
        );
    }

    #[test]
    fn test_enter_on_other_day_is_ignored() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(10, 0));
        reducer.pointer_enter(monday(), at(10, 30));
        let before = reducer.gesture().cloned();

        reducer.pointer_enter(tuesday(), at(15, 0));
        assert_eq!(reducer.gesture().cloned(), before);
    }

    #[test]
    fn test_single_cell_gesture() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(9, 0));
        let completed = reducer.pointer_up().unwrap();

        assert_eq!(completed.day, monday());
        assert_eq!(completed.keys.len(), 1);
        assert!(!reducer.state().is_dragging());
    }

    #[test]
    fn test_pointer_up_while_idle_yields_nothing() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        assert!(reducer.pointer_up().is_none());
        reducer.pointer_enter(monday(), at(9, 0));
        assert_eq!(reducer.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(9, 0));
        reducer.cancel();
        assert_eq!(reducer.state(), &SelectionState::Idle);
        assert!(reducer.pointer_up().is_none());
    }

    #[test]
    fn test_pointer_down_restarts_gesture() {
        let mut reducer = SelectionReducer::new(TimeAxis::default());
        reducer.pointer_down(monday(), at(9, 0));
        reducer.pointer_enter(monday(), at(11, 0));
        reducer.pointer_down(tuesday(), at(14, 0));

        assert_eq!(keys(reducer.gesture().unwrap()), vec!["2024-05-07-14:00"]);
    }

    #[test]
    fn test_reduce_is_pure() {
        let axis = TimeAxis::default();
        let (state, done) = reduce(
            SelectionState::Idle,
            PointerEvent::Down {
                day: monday(),
                time: at(9, 0),
            },
            &axis,
        );
        assert!(done.is_none());
        let (again, _) = reduce(
            state.clone(),
            PointerEvent::Enter {
                day: monday(),
                time: at(9, 30),
            },
            &axis,
        );
        assert_eq!(state.gesture().unwrap().len(), 1);
        assert_eq!(again.gesture().unwrap().len(), 2);
    }
}
