pub mod recipe;
pub mod storage;

pub use recipe::{Ingredient, NewRecipe, Recipe, RecipeId, ScaledRecipe};
pub use storage::{RecipeStore, StorageError};
