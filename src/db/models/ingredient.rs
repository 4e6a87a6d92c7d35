// src/db/models/ingredient.rs

//! Ingredient model - named children owned by exactly one recipe
//!
//! There is deliberately no way to change `recipe_id` on an existing row:
//! ingredients are created with their recipe and removed either all at once
//! or by the cascade when the recipe goes away.

use crate::error::Result;
use rusqlite::{Connection, Row, params};
use std::fmt;

/// An Ingredient row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub recipe_id: i64,
    pub name: String,
}

impl Ingredient {
    /// Create a new Ingredient for the given recipe
    pub fn new(recipe_id: i64, name: String) -> Self {
        Self {
            id: None,
            recipe_id,
            name,
        }
    }

    /// Insert this ingredient into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO ingredients (recipe_id, name) VALUES (?1, ?2)",
            params![&self.recipe_id, &self.name],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// All ingredients of a recipe, in insertion order
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, recipe_id, name FROM ingredients WHERE recipe_id = ?1 ORDER BY id",
        )?;

        let ingredients = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Every ingredient in the database, in insertion order
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT id, recipe_id, name FROM ingredients ORDER BY id")?;

        let ingredients = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Remove every ingredient of a recipe, returning how many were removed
    pub fn delete_by_recipe(conn: &Connection, recipe_id: i64) -> Result<usize> {
        let rows = conn.execute("DELETE FROM ingredients WHERE recipe_id = ?1", [recipe_id])?;
        Ok(rows)
    }

    /// Number of ingredients owned by a recipe
    pub fn count_by_recipe(conn: &Connection, recipe_id: i64) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM ingredients WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            recipe_id: row.get(1)?,
            name: row.get(2)?,
        })
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
