use super::quantity::parse_quantity;
use super::{Ingredient, Recipe, ScaledRecipe};

/// Round half away from zero to `places` decimal places.
///
/// Magnitudes are never negative, so this is half-up for every input we see.
/// Values too large to shift by `10^places` have no fractional digits left
/// and are returned as is.
pub fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let shifted = value * factor;
    if !shifted.is_finite() {
        return value;
    }
    shifted.round() / factor
}

/// Recompute a recipe's ingredient quantities for `target_servings`.
///
/// `target_servings` must be positive and finite; the HTTP layer rejects
/// anything else before calling this. The stored recipe is only read, so
/// scaling the same recipe twice never compounds.
pub fn scale_recipe(recipe: &Recipe, target_servings: f64) -> ScaledRecipe {
    let factor = target_servings / f64::from(recipe.original_servings);

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ingredient| scale_ingredient(ingredient, factor))
        .collect();

    ScaledRecipe {
        id: recipe.id,
        name: recipe.name.clone(),
        original_servings: recipe.original_servings,
        scaled_for_servings: target_servings,
        ingredients,
    }
}

fn scale_ingredient(ingredient: &Ingredient, factor: f64) -> Ingredient {
    let quantity = match parse_quantity(&ingredient.quantity) {
        // "<magnitude> <unit>" with exactly two decimals; clients parse this.
        Some(q) => format!("{:.2} {}", round_half_up(q.magnitude * factor, 2), q.unit),
        None => ingredient.quantity.clone(),
    };

    Ingredient {
        name: ingredient.name.clone(),
        quantity,
    }
}
