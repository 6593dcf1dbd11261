use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use recipe_common::recipe::scale_recipe as scale;
use recipe_common::{Recipe, RecipeId, RecipeStore, ScaledRecipe};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::extractors::query::AppQuery;
use crate::models::recipe::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a new recipe",
    description = "Stores a recipe with its ingredient list. Recipe and ingredients are persisted atomically; the response carries the assigned id.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_recipe = validate_create_recipe(payload)?;
    let recipe = state.store.create(new_recipe).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List all recipes",
    description = "Returns every stored recipe in creation order. No filtering or pagination.",
    responses(
        (status = 200, description = "All recipes", body = Vec<Recipe>),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(state.store.list().await?))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = String, Path, description = "Recipe ID. Anything that is not a stored id is 404.")),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = find_recipe(state.store.as_ref(), &id).await?;
    Ok(Json(recipe))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}/scale",
    tag = "Recipes",
    operation_id = "scaleRecipe",
    summary = "Scale a recipe to another serving count",
    description = "Returns the recipe with every numeric ingredient quantity multiplied by `servings / original_servings`, formatted as `\"<magnitude with 2 decimals> <unit>\"`. Quantities without a leading number are returned unchanged. Nothing is persisted.",
    params(
        ("id" = String, Path, description = "Recipe ID. Anything that is not a stored id is 404."),
        ScaleQuery,
    ),
    responses(
        (status = 200, description = "Scaled recipe", body = ScaledRecipe),
        (status = 400, description = "Missing or non-positive servings (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(servings = ?query.servings))]
pub async fn scale_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppQuery(query): AppQuery<ScaleQuery>,
) -> Result<Json<ScaledRecipe>, AppError> {
    let servings = parse_servings(query.servings.as_deref())?;
    let recipe = find_recipe(state.store.as_ref(), &id).await?;

    Ok(Json(scale(&recipe, servings)))
}

/// Ids that cannot name a stored recipe are simply unknown, never malformed.
async fn find_recipe(store: &dyn RecipeStore, raw_id: &str) -> Result<Recipe, AppError> {
    let not_found = || AppError::NotFound("Recipe not found".into());
    let id: RecipeId = raw_id.parse().map_err(|_| not_found())?;

    store.get_by_id(id).await?.ok_or_else(not_found)
}
