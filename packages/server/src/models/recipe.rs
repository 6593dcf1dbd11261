use recipe_common::{Ingredient, NewRecipe};
use serde::Deserialize;

use super::shared::validate_label;
use crate::error::AppError;

pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_INGREDIENTS: usize = 500;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    #[schema(example = "Pancakes")]
    pub name: String,
    /// Serving count the ingredient quantities are written for.
    #[schema(example = 4)]
    pub original_servings: i64,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScaleQuery {
    /// Target serving count. Any positive number, e.g. `8` or `1.5`.
    pub servings: Option<String>,
}

/// Check a create request and turn it into the store's input.
///
/// Names and quantities are trimmed; ingredient order is kept.
pub fn validate_create_recipe(req: CreateRecipeRequest) -> Result<NewRecipe, AppError> {
    validate_label(&req.name, "Name", MAX_NAME_LENGTH)?;

    let original_servings = u32::try_from(req.original_servings)
        .ok()
        .filter(|&s| s > 0 && i32::try_from(s).is_ok())
        .ok_or_else(|| {
            AppError::Validation("original_servings must be a positive integer".into())
        })?;

    if req.ingredients.len() > MAX_INGREDIENTS {
        return Err(AppError::Validation(format!(
            "Too many ingredients: max {MAX_INGREDIENTS}"
        )));
    }

    let mut ingredients = Vec::with_capacity(req.ingredients.len());
    for (i, item) in req.ingredients.into_iter().enumerate() {
        // Ingredient fields are free-form; only their length is bounded.
        for (field, value) in [("name", &item.name), ("quantity", &item.quantity)] {
            if value.chars().count() > MAX_NAME_LENGTH {
                return Err(AppError::Validation(format!(
                    "Ingredient {} {field} must be at most {MAX_NAME_LENGTH} characters",
                    i + 1
                )));
            }
        }
        ingredients.push(Ingredient {
            name: item.name.trim().to_string(),
            quantity: item.quantity.trim().to_string(),
        });
    }

    Ok(NewRecipe {
        name: req.name.trim().to_string(),
        original_servings,
        ingredients,
    })
}

/// Parse the `servings` query value into a positive, finite serving count.
pub fn parse_servings(raw: Option<&str>) -> Result<f64, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AppError::Validation(
            "servings query parameter is required".into(),
        ));
    }
    let servings: f64 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("servings must be a number, got '{raw}'")))?;
    if !servings.is_finite() || servings <= 0.0 {
        return Err(AppError::Validation(
            "servings must be a positive number".into(),
        ));
    }
    Ok(servings)
}
