use async_trait::async_trait;

use super::error::StorageError;
use crate::recipe::{NewRecipe, Recipe, RecipeId};

/// Persistence for recipe records.
///
/// Recipes are immutable once created; there is no update or delete.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a recipe and return it with its newly assigned id.
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError>;

    /// All stored recipes in ascending id order.
    async fn list(&self) -> Result<Vec<Recipe>, StorageError>;

    /// Fetch one recipe. A missing id is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError>;
}
