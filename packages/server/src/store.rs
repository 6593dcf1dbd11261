use std::collections::HashMap;

use async_trait::async_trait;
use recipe_common::{Ingredient, NewRecipe, Recipe, RecipeId, RecipeStore, StorageError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entity::{ingredient, recipe};

/// Recipe store over the `recipe` and `ingredient` tables.
#[derive(Debug, Clone)]
pub struct SqlRecipeStore {
    db: DatabaseConnection,
}

impl SqlRecipeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> StorageError {
    StorageError::Database(err.to_string())
}

fn to_domain(model: recipe::Model, ingredients: Vec<Ingredient>) -> Result<Recipe, StorageError> {
    let original_servings = u32::try_from(model.original_servings)
        .ok()
        .filter(|&s| s > 0)
        .ok_or_else(|| {
            StorageError::Corrupt(format!(
                "recipe {} has non-positive original servings",
                model.id
            ))
        })?;

    Ok(Recipe {
        id: model.id,
        name: model.name,
        original_servings,
        ingredients,
    })
}

fn to_ingredient(model: ingredient::Model) -> Ingredient {
    Ingredient {
        name: model.name,
        quantity: model.quantity,
    }
}

#[async_trait]
impl RecipeStore for SqlRecipeStore {
    async fn create(&self, new: NewRecipe) -> Result<Recipe, StorageError> {
        let original_servings = i32::try_from(new.original_servings)
            .map_err(|_| StorageError::Corrupt("original servings out of range".into()))?;

        // Recipe and ingredient rows commit together or not at all.
        let txn = self.db.begin().await.map_err(db_err)?;

        let row = recipe::ActiveModel {
            name: Set(new.name.clone()),
            original_servings: Set(original_servings),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for (position, item) in new.ingredients.iter().enumerate() {
            ingredient::ActiveModel {
                recipe_id: Set(row.id),
                position: Set(position as i32),
                name: Set(item.name.clone()),
                quantity: Set(item.quantity.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        info!(id = row.id, ingredients = new.ingredients.len(), "Recipe created");
        Ok(new.into_recipe(row.id))
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let recipes = recipe::Entity::find()
            .order_by_asc(recipe::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let rows = ingredient::Entity::find()
            .order_by_asc(ingredient::Column::RecipeId)
            .order_by_asc(ingredient::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_recipe: HashMap<RecipeId, Vec<Ingredient>> = HashMap::new();
        for row in rows {
            by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(to_ingredient(row));
        }

        recipes
            .into_iter()
            .map(|model| {
                let ingredients = by_recipe.remove(&model.id).unwrap_or_default();
                to_domain(model, ingredients)
            })
            .collect()
    }

    async fn get_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError> {
        let Some(model) = recipe::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let ingredients = ingredient::Entity::find()
            .filter(ingredient::Column::RecipeId.eq(id))
            .order_by_asc(ingredient::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(to_ingredient)
            .collect();

        to_domain(model, ingredients).map(Some)
    }
}
