// src/aggregate.rs

//! Recipe aggregates: a recipe together with the ingredients it owns
//!
//! A recipe and its ingredient list are written as one unit. Every write in
//! this module runs inside a single immediate transaction, so a failure
//! half way through (for example while re-inserting ingredients) leaves the
//! previously committed aggregate untouched.
//!
//! Ingredient lists are replaced wholesale, never merged: when an update
//! carries new ingredients, every existing ingredient row of the recipe is
//! deleted and fresh rows are inserted in the order given. Ingredient ids
//! therefore change on every replace even if the names did not.

use crate::db;
use crate::db::models::{Ingredient, Recipe};
use crate::error::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info};

/// Maximum length (in characters) of a recipe name
pub const NAME_MAX_LEN: usize = 255;
/// Maximum length (in characters) of a recipe description
pub const DESCRIPTION_MAX_LEN: usize = 1000;
/// Maximum length (in characters) of an ingredient name
pub const INGREDIENT_NAME_MAX_LEN: usize = 255;

/// A persisted recipe with its ingredients in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeAggregate {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeAggregate {
    /// Identifier of the recipe row
    pub fn id(&self) -> i64 {
        self.recipe.id.unwrap_or_default()
    }

    /// Ingredient names in insertion order
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }

    fn load(conn: &Connection, recipe: Recipe) -> Result<Self> {
        let ingredients = match recipe.id {
            Some(id) => Ingredient::find_by_recipe(conn, id)?,
            None => Vec::new(),
        };
        Ok(Self {
            recipe,
            ingredients,
        })
    }
}

/// Desired state of a brand new recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ingredients: Vec::new(),
        }
    }

    /// Append an ingredient name
    pub fn with_ingredient(mut self, name: impl Into<String>) -> Self {
        self.ingredients.push(name.into());
        self
    }

    /// Check field lengths and blankness
    pub fn validate(&self) -> Result<()> {
        validate_text("name", &self.name, NAME_MAX_LEN)?;
        validate_text("description", &self.description, DESCRIPTION_MAX_LEN)?;
        validate_ingredients(&self.ingredients)
    }
}

/// What an update does with the ingredient collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IngredientUpdate {
    /// Leave the existing ingredients exactly as they are
    #[default]
    Keep,
    /// Delete every existing ingredient and insert these, in order
    Replace(Vec<String>),
}

impl IngredientUpdate {
    /// Map the ingredient list of a request onto an update
    ///
    /// Both an absent list and an explicitly empty list mean [`Keep`]: an
    /// update can replace the ingredients of a recipe but never clear them.
    ///
    /// [`Keep`]: IngredientUpdate::Keep
    pub fn from_names(names: Option<Vec<String>>) -> Self {
        match names {
            Some(names) if !names.is_empty() => IngredientUpdate::Replace(names),
            _ => IngredientUpdate::Keep,
        }
    }
}

/// A partial update of a recipe aggregate; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: IngredientUpdate,
}

impl RecipeChanges {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_text("name", name, NAME_MAX_LEN)?;
        }
        if let Some(description) = &self.description {
            validate_text("description", description, DESCRIPTION_MAX_LEN)?;
        }
        if let IngredientUpdate::Replace(names) = &self.ingredients {
            validate_ingredients(names)?;
        }
        Ok(())
    }
}

/// Text fields are stored trimmed, so limits apply to the trimmed value
fn validate_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{field}: may not be blank")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(Error::InvalidInput(format!(
            "{field}: ensure this field has no more than {max_len} characters (got {len})"
        )));
    }
    Ok(())
}

fn validate_ingredients(names: &[String]) -> Result<()> {
    for (index, name) in names.iter().enumerate() {
        validate_text(
            &format!("ingredients[{index}].name"),
            name,
            INGREDIENT_NAME_MAX_LEN,
        )?;
    }
    Ok(())
}

fn insert_ingredients(conn: &Connection, recipe_id: i64, names: &[String]) -> Result<()> {
    for name in names {
        Ingredient::new(recipe_id, name.trim().to_string()).insert(conn)?;
    }
    Ok(())
}

/// Create a recipe and its ingredients
pub fn create_recipe(conn: &mut Connection, new: &NewRecipe) -> Result<RecipeAggregate> {
    new.validate()?;

    let aggregate = db::transaction(conn, |tx| {
        let mut recipe = Recipe::new(
            new.name.trim().to_string(),
            new.description.trim().to_string(),
        );
        let recipe_id = recipe.insert(tx)?;
        insert_ingredients(tx, recipe_id, &new.ingredients)?;
        RecipeAggregate::load(tx, recipe)
    })?;

    info!(
        "Created recipe {} ({}) with {} ingredients",
        aggregate.id(),
        aggregate.recipe,
        aggregate.ingredients.len()
    );
    Ok(aggregate)
}

/// Apply a partial update to an existing recipe
///
/// Fails with [`Error::NotFound`] (and writes nothing) when the recipe does
/// not exist. The lookup happens before validation, so an unknown id wins
/// over an invalid change.
pub fn update_recipe(
    conn: &mut Connection,
    id: i64,
    changes: &RecipeChanges,
) -> Result<RecipeAggregate> {
    let aggregate = db::transaction(conn, |tx| {
        let mut recipe =
            Recipe::find_by_id(tx, id)?.ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;
        changes.validate()?;

        if let IngredientUpdate::Replace(names) = &changes.ingredients {
            let removed = Ingredient::delete_by_recipe(tx, id)?;
            debug!(
                "Replacing {} ingredients of recipe {} with {}",
                removed,
                id,
                names.len()
            );
            insert_ingredients(tx, id, names)?;
        }

        if let Some(name) = &changes.name {
            recipe.name = name.trim().to_string();
        }
        if let Some(description) = &changes.description {
            recipe.description = description.trim().to_string();
        }
        recipe.update(tx)?;

        let recipe =
            Recipe::find_by_id(tx, id)?.ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;
        RecipeAggregate::load(tx, recipe)
    })?;

    info!("Updated recipe {} ({})", id, aggregate.recipe);
    Ok(aggregate)
}

/// Overwrite every field of an existing recipe
///
/// The ingredient list follows the same rule as [`update_recipe`]: an empty
/// list keeps the current ingredients.
pub fn replace_recipe(conn: &mut Connection, id: i64, new: &NewRecipe) -> Result<RecipeAggregate> {
    let changes = RecipeChanges {
        name: Some(new.name.clone()),
        description: Some(new.description.clone()),
        ingredients: IngredientUpdate::from_names(Some(new.ingredients.clone())),
    };
    update_recipe(conn, id, &changes)
}

/// Fetch one recipe aggregate
pub fn get_recipe(conn: &Connection, id: i64) -> Result<RecipeAggregate> {
    let recipe =
        Recipe::find_by_id(conn, id)?.ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;
    RecipeAggregate::load(conn, recipe)
}

/// List recipe aggregates, newest first
///
/// An empty filter is treated the same as no filter.
pub fn list_recipes(conn: &Connection, name_filter: Option<&str>) -> Result<Vec<RecipeAggregate>> {
    let name_filter = name_filter.filter(|f| !f.is_empty());
    debug!("Listing recipes (name filter: {:?})", name_filter);

    Recipe::list(conn, name_filter)?
        .into_iter()
        .map(|recipe| RecipeAggregate::load(conn, recipe))
        .collect()
}

/// Delete a recipe; its ingredients are removed by the cascade
pub fn delete_recipe(conn: &Connection, id: i64) -> Result<()> {
    if !Recipe::delete(conn, id)? {
        return Err(Error::NotFound(format!("recipe {id}")));
    }
    info!("Deleted recipe {}", id);
    Ok(())
}
