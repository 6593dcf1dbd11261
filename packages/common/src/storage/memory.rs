use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::traits::RecipeStore;
use crate::recipe::{NewRecipe, Recipe, RecipeId};

/// Process-local recipe store. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<BTreeMap<RecipeId, Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError> {
        let mut recipes = self.recipes.write().await;
        let id = match recipes.keys().next_back() {
            Some(&last) => last
                .checked_add(1)
                .ok_or_else(|| StorageError::Corrupt("recipe id space exhausted".into()))?,
            None => 1,
        };
        let recipe = recipe.into_recipe(id);
        recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError> {
        Ok(self.recipes.read().await.get(&id).cloned())
    }
}
