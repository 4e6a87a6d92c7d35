// src/db/models/mod.rs

//! Data models for cookbook database entities
//!
//! Each struct corresponds to one table and carries the methods for creating,
//! reading, updating and deleting its rows.

mod ingredient;
mod recipe;

pub use ingredient::Ingredient;
pub use recipe::Recipe;
