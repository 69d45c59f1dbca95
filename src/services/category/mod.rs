//! Category service for the availability category catalog.
//!
//! Stores the labels offered as toggles above the grid, along with the
//! colour used for their tags, and seeds the defaults on first run.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::category::{default_categories, Category};

/// Service for managing availability categories.
pub struct CategoryService<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Populate the catalog with defaults if it is empty.
    pub fn initialize_defaults(&self) -> Result<()> {
        let count: i32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .context("Failed to count categories")?;

        if count == 0 {
            log::info!("Initializing default categories");
            for category in default_categories() {
                if let Err(e) = self.create(category) {
                    log::warn!("Failed to create default category: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Create a new category.
    pub fn create(&self, category: Category) -> Result<Category> {
        category.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        self.conn
            .execute(
                "INSERT INTO categories (name, color, is_system) VALUES (?1, ?2, ?3)",
                params![category.name.trim(), category.color, category.is_system as i32],
            )
            .context("Failed to insert category")?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)
    }

    /// Get a category by ID.
    pub fn get_by_id(&self, id: i64) -> Result<Category> {
        self.conn
            .query_row(
                "SELECT id, name, color, is_system FROM categories WHERE id = ?1",
                params![id],
                row_to_category,
            )
            .context("Category not found")
    }

    /// All categories, built-in ones first, then by name.
    pub fn list_all(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, is_system
             FROM categories
             ORDER BY is_system DESC, name ASC",
        )?;

        let categories = stmt.query_map([], row_to_category)?;

        categories
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch categories")
    }

    /// Delete a category by ID. Built-in categories cannot be deleted.
    ///
    /// Slots already tagged with the label keep it.
    pub fn delete(&self, id: i64) -> Result<()> {
        let category = self.get_by_id(id)?;
        if category.is_system {
            return Err(anyhow::anyhow!(
                "Cannot delete system category '{}'",
                category.name
            ));
        }

        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])
            .context("Failed to delete category")?;

        Ok(())
    }
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        is_system: row.get::<_, i32>(3)? != 0,
    })
}
