// src/db/models/recipe.rs

//! Recipe model - the parent row of a recipe aggregate

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fmt;

const SELECT_COLUMNS: &str = "SELECT id, name, description, created_at FROM recipes";

/// A Recipe row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub created_at: Option<String>,
}

impl Recipe {
    /// Create a new, not yet persisted Recipe
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: None,
            name,
            description,
            created_at: None,
        }
    }

    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipes (name, description) VALUES (?1, ?2)",
            params![&self.name, &self.description],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find a recipe by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let recipe = stmt.query_row([id], Self::from_row).optional()?;
        Ok(recipe)
    }

    /// List recipes, newest first
    ///
    /// When `name_contains` is given only recipes whose name contains it
    /// (case-sensitively) are returned.
    pub fn list(conn: &Connection, name_contains: Option<&str>) -> Result<Vec<Self>> {
        let (sql, filter) = match name_contains {
            Some(fragment) => (
                format!("{SELECT_COLUMNS} WHERE instr(name, ?1) > 0 ORDER BY id DESC"),
                vec![fragment],
            ),
            None => (format!("{SELECT_COLUMNS} ORDER BY id DESC"), Vec::new()),
        };

        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(rusqlite::params_from_iter(filter), Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Write name and description back to the database
    ///
    /// Returns false when no row with this recipe's id exists.
    pub fn update(&self, conn: &Connection) -> Result<bool> {
        let Some(id) = self.id else {
            return Ok(false);
        };

        let rows = conn.execute(
            "UPDATE recipes SET name = ?1, description = ?2 WHERE id = ?3",
            params![&self.name, &self.description, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete a recipe by ID; its ingredients go with it
    ///
    /// Returns false when there was nothing to delete.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Total number of recipes
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
