//! Reconciliation of a finished gesture with stored availability.
//!
//! Saving is a two-phase operation against the store: rows at the selected
//! start times are deleted, then one new row per start time is inserted with
//! the chosen categories. Stores without transactions cannot make that
//! atomic, so a failure in either phase is recovered by re-fetching the
//! visible week instead of rolling back. The local map only takes the new
//! rows once the store has accepted them.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

use super::error::AvailabilityError;
use super::store::AvailabilityStore;
use crate::models::category::CategorySelection;
use crate::models::slot::{AvailabilitySlot, OwnerId};
use crate::models::slot_key::SlotKey;
use crate::utils::date::end_of_week_exclusive;

/// Client-side copy of the stored slots for the visible week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSlots {
    slots: BTreeMap<SlotKey, AvailabilitySlot>,
}

impl PersistedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<AvailabilitySlot>) -> Self {
        let mut map = Self::new();
        map.replace_all(rows);
        map
    }

    pub fn get(&self, key: &SlotKey) -> Option<&AvailabilitySlot> {
        self.slots.get(key)
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &AvailabilitySlot)> {
        self.slots.iter()
    }

    /// Insert rows, replacing whatever was stored under the same keys.
    pub fn merge(&mut self, rows: impl IntoIterator<Item = AvailabilitySlot>) {
        for row in rows {
            self.slots.insert(row.key(), row);
        }
    }

    /// Discard everything and load `rows` (full re-fetch).
    pub fn replace_all(&mut self, rows: Vec<AvailabilitySlot>) {
        self.slots.clear();
        self.merge(rows);
    }

    /// Hours of availability per category, for a grid with `slot_minutes` buckets.
    pub fn hours_by_category(&self, slot_minutes: u32) -> BTreeMap<String, f32> {
        let mut totals = BTreeMap::new();
        for slot in self.slots.values() {
            for category in &slot.categories {
                *totals.entry(category.clone()).or_insert(0.0) += slot_minutes as f32 / 60.0;
            }
        }
        totals
    }
}

/// Validated work for one reconciliation, independent of any store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub owner: OwnerId,
    pub starts: Vec<NaiveDateTime>,
    pub rows: Vec<AvailabilitySlot>,
}

impl ReconcilePlan {
    /// Check the inputs and build the rows to insert.
    ///
    /// Fails with `NoCategorySelected` before touching any key, and with
    /// `MalformedKey` if a key cannot be decoded.
    pub fn build(
        keys: &BTreeSet<SlotKey>,
        categories: &CategorySelection,
        owner: &OwnerId,
    ) -> Result<Self, AvailabilityError> {
        if categories.is_empty() {
            return Err(AvailabilityError::NoCategorySelected);
        }

        let starts = keys
            .iter()
            .map(|key| {
                key.start_time().map_err(|e| {
                    log::error!("Refusing to reconcile: {}", e);
                    AvailabilityError::from(e)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = starts
            .iter()
            .map(|start| AvailabilitySlot::new(owner.clone(), *start, categories.labels().to_vec()))
            .collect();

        Ok(Self {
            owner: owner.clone(),
            starts,
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Run the delete + insert of `plan` against `store`.
pub fn execute<S>(store: &S, plan: &ReconcilePlan) -> Result<Vec<AvailabilitySlot>, AvailabilityError>
where
    S: AvailabilityStore + ?Sized,
{
    if plan.is_empty() {
        return Ok(Vec::new());
    }

    store
        .replace_slots(&plan.owner, &plan.starts, &plan.rows)
        .map_err(AvailabilityError::persistence)?;

    Ok(plan.rows.clone())
}

/// Load every slot of the week starting at `week_start`.
pub fn fetch_week<S>(
    store: &S,
    owner: &OwnerId,
    week_start: NaiveDate,
) -> Result<Vec<AvailabilitySlot>, AvailabilityError>
where
    S: AvailabilityStore + ?Sized,
{
    let from = week_start.and_time(chrono::NaiveTime::MIN);
    let to = end_of_week_exclusive(week_start).and_time(chrono::NaiveTime::MIN);
    store
        .fetch_range(owner, from, to)
        .map_err(AvailabilityError::persistence)
}

/// A planned save for the week starting at `week_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileJob {
    pub plan: ReconcilePlan,
    pub week_start: NaiveDate,
}

impl ReconcileJob {
    /// Write the plan to `store`. After a failed write the week is read
    /// back so the caller can resynchronise.
    pub fn run<S>(self, store: &S) -> ReconcileOutcome
    where
        S: AvailabilityStore + ?Sized,
    {
        let result = execute(store, &self.plan);
        let refetched = match &result {
            Ok(_) => None,
            Err(err) => {
                log::warn!("{}; reloading week of {}", err, self.week_start);
                match fetch_week(store, &self.plan.owner, self.week_start) {
                    Ok(rows) => Some(rows),
                    Err(e) => {
                        log::warn!("Re-fetch after failed save also failed: {}", e);
                        None
                    }
                }
            }
        };

        ReconcileOutcome {
            owner: self.plan.owner,
            week_start: self.week_start,
            result,
            refetched,
        }
    }
}

/// Result of running a `ReconcileJob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub owner: OwnerId,
    pub week_start: NaiveDate,
    pub result: Result<Vec<AvailabilitySlot>, AvailabilityError>,
    /// Authoritative rows read back after a failure
    pub refetched: Option<Vec<AvailabilitySlot>>,
}

impl ReconcileOutcome {
    /// Fold the outcome into `persisted`: merge on success, reload from the
    /// re-fetched rows on failure.
    pub fn apply_to(
        self,
        persisted: &mut PersistedSlots,
    ) -> Result<Vec<AvailabilitySlot>, AvailabilityError> {
        match self.result {
            Ok(rows) => {
                persisted.merge(rows.clone());
                if !rows.is_empty() {
                    log::info!("Saved {} availability slot(s) for {}", rows.len(), self.owner);
                }
                Ok(rows)
            }
            Err(err) => {
                if let Some(rows) = self.refetched {
                    persisted.replace_all(rows);
                }
                Err(err)
            }
        }
    }
}

/// Persist a finished gesture and update `persisted` to match.
///
/// On success the new rows are merged into `persisted`. On a store failure
/// nothing is merged; the week is reloaded from the store instead and the
/// original error is returned.
pub fn reconcile<S>(
    store: &S,
    persisted: &mut PersistedSlots,
    keys: &BTreeSet<SlotKey>,
    categories: &CategorySelection,
    owner: &OwnerId,
    week_start: NaiveDate,
) -> Result<Vec<AvailabilitySlot>, AvailabilityError>
where
    S: AvailabilityStore + ?Sized,
{
    let plan = ReconcilePlan::build(keys, categories, owner)?;
    ReconcileJob { plan, week_start }.run(store).apply_to(persisted)
}
