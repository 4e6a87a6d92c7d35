// src/db/migrations.rs
//! Database migration implementations
//!
//! Each function moves the schema forward by exactly one version and is
//! only ever called by [`super::schema::migrate`].

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Initial schema - Version 1
///
/// - recipes: name and description, AUTOINCREMENT id so ids are never reused
/// - ingredients: named children of a recipe, removed with their recipe
pub fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX idx_recipes_name ON recipes(name);

        CREATE TABLE ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_ingredients_recipe_id ON ingredients(recipe_id);
        ",
    )?;

    info!("Schema version 1 created successfully");
    Ok(())
}
