// src/lib.rs

//! Cookbook recipe service
//!
//! Stores recipes and their ingredient lists in SQLite and serves them over
//! a JSON HTTP API.
//!
//! # Architecture
//!
//! - `db`: connection handling, schema migrations and one model per table
//! - `aggregate`: recipe + ingredients written and read as one unit
//! - `server`: axum router, handlers and configuration

pub mod aggregate;
pub mod db;
mod error;
pub mod server;

pub use aggregate::{
    IngredientUpdate, NewRecipe, RecipeAggregate, RecipeChanges, create_recipe, delete_recipe,
    get_recipe, list_recipes, replace_recipe, update_recipe,
};
pub use error::{Error, Result};
pub use server::{ServerConfig, ServiceConfig, run_server};
