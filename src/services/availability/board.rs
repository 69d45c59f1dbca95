use chrono::{Duration, NaiveDate, NaiveTime};

use super::error::AvailabilityError;
use super::reconciler::{fetch_week, PersistedSlots, ReconcileJob, ReconcileOutcome, ReconcilePlan};
use super::store::AvailabilityStore;
use crate::models::category::CategorySelection;
use crate::models::gesture::DragGesture;
use crate::models::settings::GridSettings;
use crate::models::slot::OwnerId;
use crate::services::auth::AuthProvider;
use crate::services::grid::GridModel;
use crate::services::selection::SelectionReducer;
use crate::services::time_axis::{week_dates, TimeAxis, DAYS_PER_WEEK};
use crate::utils::date::start_of_week;

/// Page-level state of the weekly availability editor.
///
/// Owns the selection reducer, the category toggles and the client copy of
/// the visible week. The persisted map changes only through `refresh` (and
/// the week navigation built on it) and through applied reconcile outcomes.
pub struct AvailabilityBoard {
    auth: Box<dyn AuthProvider>,
    settings: GridSettings,
    reducer: SelectionReducer,
    selection: CategorySelection,
    persisted: PersistedSlots,
    week_start: NaiveDate,
}

impl AvailabilityBoard {
    /// Board showing the week containing `today`. Nothing is loaded until
    /// `refresh` is called.
    pub fn new(auth: Box<dyn AuthProvider>, settings: GridSettings, today: NaiveDate) -> Self {
        let week_start = start_of_week(today, settings.first_day_of_week);
        Self {
            auth,
            reducer: SelectionReducer::new(TimeAxis::from_settings(&settings)),
            settings,
            selection: CategorySelection::new(),
            persisted: PersistedSlots::new(),
            week_start,
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn dates(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        week_dates(self.week_start)
    }

    pub fn axis(&self) -> &TimeAxis {
        self.reducer.axis()
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn persisted(&self) -> &PersistedSlots {
        &self.persisted
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut CategorySelection {
        &mut self.selection
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.reducer.gesture()
    }

    /// View model for the current week.
    pub fn grid(&self) -> GridModel {
        GridModel::build(&self.persisted, self.gesture(), &self.dates(), self.axis())
    }

    /// Use new grid settings. Drops the gesture in progress and re-snaps the
    /// week start; call `refresh` afterwards.
    pub fn apply_settings(&mut self, settings: GridSettings) {
        self.reducer.set_axis(TimeAxis::from_settings(&settings));
        self.week_start = start_of_week(self.week_start, settings.first_day_of_week);
        self.settings = settings;
    }

    fn owner(&self) -> Result<OwnerId, AvailabilityError> {
        self.auth
            .current_owner()
            .ok_or(AvailabilityError::NotAuthenticated)
    }

    /// Reload the visible week from the store. Returns the number of slots.
    pub fn refresh<S>(&mut self, store: &S) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        let owner = self.owner()?;
        let rows = fetch_week(store, &owner, self.week_start)?;
        log::info!(
            "Loaded {} availability slot(s) for week of {}",
            rows.len(),
            self.week_start
        );
        self.persisted.replace_all(rows);
        Ok(self.persisted.len())
    }

    /// Show the week containing `date` and reload it.
    pub fn go_to_week<S>(&mut self, store: &S, date: NaiveDate) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        self.reducer.cancel();
        self.week_start = start_of_week(date, self.settings.first_day_of_week);
        self.persisted = PersistedSlots::new();
        self.refresh(store)
    }

    /// Show the week containing `today`.
    pub fn current_week<S>(&mut self, store: &S, today: NaiveDate) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        self.go_to_week(store, today)
    }

    pub fn next_week<S>(&mut self, store: &S) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        self.go_to_week(store, self.week_start + Duration::days(7))
    }

    pub fn previous_week<S>(&mut self, store: &S) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        self.go_to_week(store, self.week_start - Duration::days(7))
    }

    pub fn pointer_down(&mut self, day: NaiveDate, time: NaiveTime) {
        self.reducer.pointer_down(day, time);
    }

    pub fn pointer_enter(&mut self, day: NaiveDate, time: NaiveTime) {
        self.reducer.pointer_enter(day, time);
    }

    /// Abandon the gesture without saving.
    pub fn cancel_gesture(&mut self) {
        self.reducer.cancel();
    }

    /// End the gesture and turn it into a job for the store.
    ///
    /// The gesture is cleared whatever happens. Returns `Ok(None)` when no
    /// gesture was in progress.
    pub fn finish_gesture(&mut self) -> Result<Option<ReconcileJob>, AvailabilityError> {
        let Some(completed) = self.reducer.pointer_up() else {
            return Ok(None);
        };

        let owner = self.owner()?;
        let plan = ReconcilePlan::build(&completed.keys, &self.selection, &owner)?;
        Ok(Some(ReconcileJob {
            plan,
            week_start: self.week_start,
        }))
    }

    /// Finish the gesture and save it synchronously. Returns the number of
    /// slots written.
    pub fn pointer_up<S>(&mut self, store: &S) -> Result<usize, AvailabilityError>
    where
        S: AvailabilityStore + ?Sized,
    {
        match self.finish_gesture()? {
            Some(job) => self.apply_outcome(job.run(store)),
            None => Ok(0),
        }
    }

    /// Fold a finished job into the visible week.
    ///
    /// Outcomes for another owner or a week no longer shown are dropped; the
    /// next `refresh` of that week picks up whatever was stored.
    pub fn apply_outcome(&mut self, outcome: ReconcileOutcome) -> Result<usize, AvailabilityError> {
        let current_owner = self.auth.current_owner();
        if outcome.week_start != self.week_start || current_owner.as_ref() != Some(&outcome.owner) {
            log::debug!(
                "Discarding reconcile outcome for week of {} (showing {})",
                outcome.week_start,
                self.week_start
            );
            return outcome.result.map(|rows| rows.len());
        }

        outcome.apply_to(&mut self.persisted).map(|rows| rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::AvailabilitySlot;
    use crate::models::slot_key::SlotKey;
    use crate::services::auth::{MockAuthProvider, StaticAuth};
    use crate::services::availability::store::SqliteStore;
    use crate::services::database::Database;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn board() -> AvailabilityBoard {
        AvailabilityBoard::new(
            Box::new(StaticAuth::signed_in("owner-1")),
            GridSettings::default(),
            monday() + Duration::days(2),
        )
    }

    fn key(raw: &str) -> SlotKey {
        SlotKey::parse(raw).unwrap()
    }

    #[test]
    fn test_week_snaps_to_first_day() {
        let board = board();
        assert_eq!(board.week_start(), monday());
        assert_eq!(board.dates()[6], NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
    }

    #[test]
    fn test_drag_and_save() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();
        board.selection_mut().select("Design");

        board.pointer_down(monday(), at(10, 0));
        board.pointer_enter(monday(), at(11, 0));
        let saved = board.pointer_up(&store).unwrap();

        assert_eq!(saved, 3);
        assert!(board.gesture().is_none());
        assert!(board.persisted().contains(&key("2024-05-06-10:30")));

        let mut reloaded = self::board();
        reloaded.refresh(&store).unwrap();
        assert_eq!(reloaded.persisted(), board.persisted());
    }

    #[test]
    fn test_pointer_up_without_category_clears_gesture() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();

        board.pointer_down(monday(), at(10, 0));
        let result = board.pointer_up(&store);

        assert_eq!(result, Err(AvailabilityError::NoCategorySelected));
        assert!(board.gesture().is_none());
        assert!(board.persisted().is_empty());
    }

    #[test]
    fn test_pointer_up_without_gesture_is_noop() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();
        assert_eq!(board.pointer_up(&store), Ok(0));
    }

    #[test]
    fn test_not_authenticated_blocks_fetch_and_save() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());

        let mut auth = MockAuthProvider::new();
        auth.expect_current_owner().returning(|| None);
        let mut board = AvailabilityBoard::new(Box::new(auth), GridSettings::default(), monday());
        board.selection_mut().select("Design");

        assert_eq!(board.refresh(&store), Err(AvailabilityError::NotAuthenticated));

        board.pointer_down(monday(), at(9, 0));
        assert_eq!(board.pointer_up(&store), Err(AvailabilityError::NotAuthenticated));
        assert!(board.gesture().is_none());
    }

    #[test]
    fn test_week_navigation_refetches() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();
        board.selection_mut().select("Support");

        board.pointer_down(monday(), at(9, 0));
        board.pointer_up(&store).unwrap();

        assert_eq!(board.next_week(&store), Ok(0));
        assert_eq!(board.week_start(), monday() + Duration::days(7));
        assert!(board.persisted().is_empty());

        assert_eq!(board.previous_week(&store), Ok(1));
        assert_eq!(board.week_start(), monday());

        board.go_to_week(&store, monday() + Duration::days(30)).unwrap();
        assert_eq!(board.current_week(&store, monday() + Duration::days(3)), Ok(1));
        assert_eq!(board.week_start(), monday());
    }

    #[test]
    fn test_navigation_drops_gesture() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();

        board.pointer_down(monday(), at(9, 0));
        board.next_week(&store).unwrap();
        assert!(board.gesture().is_none());
    }

    #[test]
    fn test_outcome_for_other_week_is_not_merged() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();
        board.selection_mut().select("Design");

        board.pointer_down(monday(), at(9, 0));
        let job = board.finish_gesture().unwrap().unwrap();
        board.next_week(&store).unwrap();

        assert_eq!(board.apply_outcome(job.run(&store)), Ok(1));
        assert!(board.persisted().is_empty());

        board.previous_week(&store).unwrap();
        assert_eq!(board.persisted().len(), 1);
    }

    #[test]
    fn test_later_outcome_wins() {
        let db = setup_test_db();
        let store = SqliteStore::new(db.connection());
        let mut board = board();

        board.selection_mut().select("Design");
        board.pointer_down(monday(), at(9, 0));
        let first = board.finish_gesture().unwrap().unwrap();

        board.selection_mut().clear();
        board.selection_mut().select("Support");
        board.pointer_down(monday(), at(9, 0));
        let second = board.finish_gesture().unwrap().unwrap();

        let first = first.run(&store);
        let second = second.run(&store);
        board.apply_outcome(first).unwrap();
        board.apply_outcome(second).unwrap();

        let slot: &AvailabilitySlot = board.persisted().get(&key("2024-05-06-09:00")).unwrap();
        assert_eq!(slot.categories, vec!["Support".to_string()]);
    }

    #[test]
    fn test_apply_settings_changes_axis() {
        let mut board = board();
        board.apply_settings(GridSettings {
            day_start: "08:00".into(),
            day_end: "12:00".into(),
            slot_minutes: 60,
            first_day_of_week: 0,
            ..GridSettings::default()
        });
        assert_eq!(board.axis().len(), 5);
        assert_eq!(board.week_start(), NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
        assert_eq!(board.grid().rows.len(), 5);
    }
}
