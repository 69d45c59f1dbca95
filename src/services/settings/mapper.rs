use crate::models::settings::GridSettings;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<GridSettings, rusqlite::Error> {
    Ok(GridSettings {
        id: Some(row.get(0)?),
        day_start: row.get(1)?,
        day_end: row.get(2)?,
        slot_minutes: row.get(3)?,
        first_day_of_week: row.get(4)?,
    })
}
