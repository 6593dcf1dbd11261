mod quantity;
mod scale;

use serde::{Deserialize, Serialize};

pub use quantity::{Quantity, parse_quantity};
pub use scale::{round_half_up, scale_recipe};

/// Store-assigned recipe identifier.
pub type RecipeId = i32;

/// A single line of a recipe's ingredient list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Ingredient {
    #[schema(example = "Flour")]
    pub name: String,
    /// Free-form quantity label: a leading magnitude and a unit, or plain text.
    #[schema(example = "200g")]
    pub quantity: String,
}

/// A stored recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recipe {
    #[schema(example = 1)]
    pub id: RecipeId,
    #[schema(example = "Pancakes")]
    pub name: String,
    /// Serving count the stored quantities correspond to. Always positive.
    #[schema(example = 4)]
    pub original_servings: u32,
    pub ingredients: Vec<Ingredient>,
}

/// Validated input for creating a recipe. The store assigns the id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub original_servings: u32,
    pub ingredients: Vec<Ingredient>,
}

impl NewRecipe {
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            original_servings: self.original_servings,
            ingredients: self.ingredients,
        }
    }
}

/// A recipe view with quantities recomputed for another serving count.
///
/// Built per request and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ScaledRecipe {
    #[schema(example = 1)]
    pub id: RecipeId,
    #[schema(example = "Pancakes")]
    pub name: String,
    #[schema(example = 4)]
    pub original_servings: u32,
    /// Serving count the returned quantities correspond to.
    #[serde(serialize_with = "serialize_servings")]
    #[schema(value_type = f64, example = 8)]
    pub scaled_for_servings: f64,
    pub ingredients: Vec<Ingredient>,
}

/// Whole serving counts go out as JSON integers (`8`, not `8.0`).
fn serialize_servings<S>(servings: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if servings.fract() == 0.0 && *servings >= 0.0 && *servings <= u64::MAX as f64 {
        serializer.serialize_u64(*servings as u64)
    } else {
        serializer.serialize_f64(*servings)
    }
}
