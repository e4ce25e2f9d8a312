use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use super::{AppError, AppState};
use crate::domain::Recipe;

/// Query string of `GET /recipe/:id`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RecipeQuery {
    /// Ingredient to scale by.
    ingredient: Option<String>,
    /// Target quantity of `ingredient`, kept as text so that a malformed
    /// number is reported as a bad request by this handler.
    quantity: Option<String>,
}

/// Query string of `GET /recipes`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQuery {
    /// Only list recipes using this ingredient.
    ingredient: Option<String>,
}

/// GET /recipe/:id
///
/// Returns the recipe, optionally scaled so that `ingredient` amounts to
/// `quantity`:
/// - 200 OK with the recipe
/// - 400 Bad Request if `quantity` is not a positive number, or the query
///   string cannot be decoded
/// - 404 Not Found if the recipe or the ingredient is unknown
pub(super) async fn get_recipe(
    State(catalog): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<RecipeQuery>, QueryRejection>,
) -> Result<Json<Recipe>, AppError> {
    let Query(query) = query?;
    let quantity = parse_quantity(query.quantity.as_deref())?;
    let ingredient = query.ingredient.as_deref().unwrap_or_default();

    let recipe = catalog.get_recipe(&id, ingredient, quantity)?;

    Ok(Json(recipe))
}

/// GET /recipes
///
/// Lists every recipe, or only those using `ingredient` (exact name match).
/// An undecodable query string is a 400 Bad Request.
pub(super) async fn list_recipes(
    State(catalog): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let Query(query) = query?;
    match query.ingredient.as_deref() {
        Some(ingredient) if !ingredient.is_empty() => {
            tracing::debug!("Listing recipes with ingredient {ingredient}");
        }
        _ => tracing::debug!("Listing all recipes"),
    }

    Ok(Json(catalog.list_recipes(query.ingredient.as_deref())))
}

/// GET /ingredients
///
/// Lists the distinct ingredient names used across all recipes.
pub(super) async fn list_ingredients(State(catalog): State<AppState>) -> Json<Vec<String>> {
    tracing::debug!("Listing all ingredients");

    Json(catalog.list_ingredients())
}

/// An absent or empty quantity means "no constraint" and maps to zero.
///
/// Surrounding whitespace is not stripped, so `" 40"` is rejected.
fn parse_quantity(raw: Option<&str>) -> Result<f64, AppError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(0.0);
    };

    raw.parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite() && *quantity > 0.0)
        .ok_or_else(|| AppError::InvalidQuantity(raw.to_string()))
}
