// src/server/handlers/recipes.rs
//! Recipe resource handlers
//!
//! Wire contract for ingredient lists on `PATCH` and `PUT`: an absent
//! `ingredients` field and an empty `ingredients` array both leave the
//! recipe's current ingredients in place. A non-empty array replaces them.
//! Fields of a `PATCH` body may be omitted but never `null`. Text values are
//! stored with surrounding whitespace trimmed.
//!
//! An unknown recipe id is reported as 404 even when the body is also bad.

use super::with_db;
use crate::aggregate::{self, IngredientUpdate, NewRecipe, RecipeAggregate, RecipeChanges};
use crate::server::{ApiResult, SharedState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::Json,
};
use serde::{Deserialize, Deserializer, Serialize};

/// An ingredient as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientBody {
    pub name: String,
}

/// A recipe as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBody {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<IngredientBody>,
    pub description: String,
}

impl From<&RecipeAggregate> for RecipeBody {
    fn from(aggregate: &RecipeAggregate) -> Self {
        Self {
            id: aggregate.id(),
            name: aggregate.recipe.name.clone(),
            ingredients: aggregate
                .ingredients
                .iter()
                .map(|i| IngredientBody {
                    name: i.name.clone(),
                })
                .collect(),
            description: aggregate.recipe.description.clone(),
        }
    }
}

fn ingredient_names(ingredients: Vec<IngredientBody>) -> Vec<String> {
    ingredients.into_iter().map(|i| i.name).collect()
}

/// Body of `POST /recipes`; every field is required
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<IngredientBody>,
}

impl From<CreateRecipeRequest> for NewRecipe {
    fn from(req: CreateRecipeRequest) -> Self {
        NewRecipe {
            name: req.name,
            description: req.description,
            ingredients: ingredient_names(req.ingredients),
        }
    }
}

/// Body of `PUT /recipes/:id`; every field is required
pub type ReplaceRecipeRequest = CreateRecipeRequest;

/// Body of `PATCH /recipes/:id`; any subset of fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub ingredients: Option<Vec<IngredientBody>>,
}

/// An omitted field falls back to `None` via `serde(default)`; an explicit
/// `null` must fail like any other mistyped value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<UpdateRecipeRequest> for RecipeChanges {
    fn from(req: UpdateRecipeRequest) -> Self {
        RecipeChanges {
            name: req.name,
            description: req.description,
            ingredients: IngredientUpdate::from_names(req.ingredients.map(ingredient_names)),
        }
    }
}

/// Query parameters of `GET /recipes`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only return recipes whose name contains this
    pub name: Option<String>,
}

/// Unwrap a request body for recipe `id`, reporting a missing recipe first
async fn body_for<T>(
    state: &SharedState,
    id: i64,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            with_db(state, move |conn| aggregate::get_recipe(conn, id)).await?;
            Err(rejection.into())
        }
    }
}

/// List recipes
///
/// GET /recipes?name=<substring>
///
/// Newest recipes come first.
pub async fn list_recipes(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<RecipeBody>>> {
    let recipes = with_db(&state, move |conn| {
        aggregate::list_recipes(conn, query.name.as_deref())
    })
    .await?;

    Ok(Json(recipes.iter().map(RecipeBody::from).collect()))
}

/// Get one recipe
///
/// GET /recipes/:id
pub async fn get_recipe(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<RecipeBody>> {
    let Path(id) = id?;
    let recipe = with_db(&state, move |conn| aggregate::get_recipe(conn, id)).await?;
    Ok(Json(RecipeBody::from(&recipe)))
}

/// Create a recipe
///
/// POST /recipes
///
/// Returns 201 with a `Location` header pointing at the new recipe.
pub async fn create_recipe(
    State(state): State<SharedState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<RecipeBody>)> {
    let Json(request) = payload?;
    let new = NewRecipe::from(request);

    let recipe = with_db(&state, move |conn| aggregate::create_recipe(conn, &new)).await?;

    let location = format!("/recipes/{}", recipe.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(RecipeBody::from(&recipe)),
    ))
}

/// Partially update a recipe
///
/// PATCH /recipes/:id
pub async fn update_recipe(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateRecipeRequest>, JsonRejection>,
) -> ApiResult<Json<RecipeBody>> {
    let Path(id) = id?;
    let changes = RecipeChanges::from(body_for(&state, id, payload).await?);

    let recipe = with_db(&state, move |conn| {
        aggregate::update_recipe(conn, id, &changes)
    })
    .await?;

    Ok(Json(RecipeBody::from(&recipe)))
}

/// Replace every field of a recipe
///
/// PUT /recipes/:id
pub async fn replace_recipe(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReplaceRecipeRequest>, JsonRejection>,
) -> ApiResult<Json<RecipeBody>> {
    let Path(id) = id?;
    let new = NewRecipe::from(body_for(&state, id, payload).await?);

    let recipe =
        with_db(&state, move |conn| aggregate::replace_recipe(conn, id, &new)).await?;

    Ok(Json(RecipeBody::from(&recipe)))
}

/// Delete a recipe and its ingredients
///
/// DELETE /recipes/:id
pub async fn delete_recipe(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    with_db(&state, move |conn| aggregate::delete_recipe(conn, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_body_field_names() {
        let body = RecipeBody {
            id: 1,
            name: "Toast".to_string(),
            ingredients: vec![IngredientBody {
                name: "Bread".to_string(),
            }],
            description: "Crunchy".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Toast",
                "ingredients": [{"name": "Bread"}],
                "description": "Crunchy",
            })
        );
    }

    #[test]
    fn test_create_request_requires_ingredients() {
        let result: Result<CreateRecipeRequest, _> =
            serde_json::from_str(r#"{"name": "Toast", "description": "Crunchy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_ingredient_states() {
        let absent: UpdateRecipeRequest = serde_json::from_str(r#"{"name": "Toast"}"#).unwrap();
        assert_eq!(RecipeChanges::from(absent).ingredients, IngredientUpdate::Keep);

        let empty: UpdateRecipeRequest = serde_json::from_str(r#"{"ingredients": []}"#).unwrap();
        assert_eq!(RecipeChanges::from(empty).ingredients, IngredientUpdate::Keep);

        let some: UpdateRecipeRequest =
            serde_json::from_str(r#"{"ingredients": [{"name": "Jam"}]}"#).unwrap();
        assert_eq!(
            RecipeChanges::from(some).ingredients,
            IngredientUpdate::Replace(vec!["Jam".to_string()])
        );
    }

    #[test]
    fn test_update_request_rejects_null() {
        for body in [
            r#"{"name": null}"#,
            r#"{"description": null}"#,
            r#"{"ingredients": null}"#,
        ] {
            let result: Result<UpdateRecipeRequest, _> = serde_json::from_str(body);
            assert!(result.is_err(), "accepted {}", body);
        }
    }

    #[test]
    fn test_update_request_ignores_read_only_id() {
        let req: UpdateRecipeRequest =
            serde_json::from_str(r#"{"id": 99, "description": "New"}"#).unwrap();
        let changes = RecipeChanges::from(req);
        assert_eq!(changes.name, None);
        assert_eq!(changes.description.as_deref(), Some("New"));
    }
}
