//! Persistence backend for availability slots.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::models::slot::{AvailabilitySlot, OwnerId};

/// Timestamps are stored as zero padded text so range queries sort correctly.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Remote or local storage holding availability rows.
pub trait AvailabilityStore {
    /// Rows for `owner` with `from <= start_time < to`, ordered by start.
    fn fetch_range(
        &self,
        owner: &OwnerId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<AvailabilitySlot>>;

    /// Remove rows for `owner` starting at any of `starts`. Missing rows are
    /// not an error. Returns how many rows were removed.
    fn delete_slots(&self, owner: &OwnerId, starts: &[NaiveDateTime]) -> Result<usize>;

    fn insert_slots(&self, slots: &[AvailabilitySlot]) -> Result<()>;

    /// Replace the rows at `starts` with `slots`.
    ///
    /// The default runs delete then insert as two separate calls, so an
    /// insert failure leaves the deleted rows gone.
    fn replace_slots(
        &self,
        owner: &OwnerId,
        starts: &[NaiveDateTime],
        slots: &[AvailabilitySlot],
    ) -> Result<()> {
        self.delete_slots(owner, starts)?;
        self.insert_slots(slots)
    }
}

/// SQLite implementation backed by the `availability_slots` table.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl AvailabilityStore for SqliteStore<'_> {
    fn fetch_range(
        &self,
        owner: &OwnerId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<AvailabilitySlot>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, start_time, end_time, categories
             FROM availability_slots
             WHERE owner_id = ?1 AND start_time >= ?2 AND start_time < ?3
             ORDER BY start_time ASC",
        )?;

        let rows = stmt.query_map(
            params![
                owner.as_str(),
                from.format(TIMESTAMP_FORMAT).to_string(),
                to.format(TIMESTAMP_FORMAT).to_string(),
            ],
            row_to_slot,
        )?;

        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch availability slots")
    }

    fn delete_slots(&self, owner: &OwnerId, starts: &[NaiveDateTime]) -> Result<usize> {
        delete_in(self.conn, owner, starts)
    }

    fn insert_slots(&self, slots: &[AvailabilitySlot]) -> Result<()> {
        insert_in(self.conn, slots)
    }

    /// Runs delete and insert inside one transaction, so readers never see
    /// the replaced keys empty and a failed insert restores the old rows.
    fn replace_slots(
        &self,
        owner: &OwnerId,
        starts: &[NaiveDateTime],
        slots: &[AvailabilitySlot],
    ) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin availability transaction")?;
        delete_in(&tx, owner, starts)?;
        insert_in(&tx, slots)?;
        tx.commit()
            .context("Failed to commit availability transaction")
    }
}

fn delete_in(conn: &Connection, owner: &OwnerId, starts: &[NaiveDateTime]) -> Result<usize> {
    let mut stmt = conn
        .prepare("DELETE FROM availability_slots WHERE owner_id = ?1 AND start_time = ?2")
        .context("Failed to prepare availability delete")?;

    let mut removed = 0;
    for start in starts {
        removed += stmt
            .execute(params![
                owner.as_str(),
                start.format(TIMESTAMP_FORMAT).to_string()
            ])
            .context("Failed to delete availability slots")?;
    }

    Ok(removed)
}

fn insert_in(conn: &Connection, slots: &[AvailabilitySlot]) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO availability_slots (id, owner_id, start_time, end_time, categories)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .context("Failed to prepare availability insert")?;

    for slot in slots {
        let categories = serde_json::to_string(&slot.categories)
            .context("Failed to serialize slot categories")?;
        stmt.execute(params![
            slot.id,
            slot.owner_id.as_str(),
            slot.start_time.format(TIMESTAMP_FORMAT).to_string(),
            slot.end_time.format(TIMESTAMP_FORMAT).to_string(),
            categories,
        ])
        .context("Failed to insert availability slots")?;
    }

    Ok(())
}

fn row_to_slot(row: &rusqlite::Row<'_>) -> rusqlite::Result<AvailabilitySlot> {
    let categories: String = row.get(4)?;
    let categories: Vec<String> = serde_json::from_str(&categories)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(AvailabilitySlot {
        id: row.get(0)?,
        owner_id: OwnerId::new(row.get::<_, String>(1)?),
        start_time: parse_timestamp(2, row.get(2)?)?,
        end_time: parse_timestamp(3, row.get(3)?)?,
        categories,
    })
}

fn parse_timestamp(column: usize, value: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
