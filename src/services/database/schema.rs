use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;
use crate::services::category::CategoryService;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_categories_table(conn)?;
    CategoryService::new(conn).initialize_defaults()?;
    create_availability_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            day_start TEXT NOT NULL DEFAULT '09:00',
            day_end TEXT NOT NULL DEFAULT '17:30',
            slot_minutes INTEGER NOT NULL DEFAULT 30,
            first_day_of_week INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "settings",
        "slot_minutes",
        "ALTER TABLE settings ADD COLUMN slot_minutes INTEGER NOT NULL DEFAULT 30",
    )?;

    migrations::ensure_column(
        conn,
        "settings",
        "first_day_of_week",
        "ALTER TABLE settings ADD COLUMN first_day_of_week INTEGER NOT NULL DEFAULT 1",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, day_start, day_end, slot_minutes, first_day_of_week)
         VALUES (1, '09:00', '17:30', 30, 1)",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_categories_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL,
            is_system INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("Failed to create categories table")?;

    Ok(())
}

fn create_availability_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS availability_slots (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            categories TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create availability_slots table")?;

    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_availability_owner_start
         ON availability_slots (owner_id, start_time)",
        [],
    )
    .context("Failed to create availability owner/start index")?;

    Ok(())
}
