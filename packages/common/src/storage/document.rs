use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::StorageError;
use super::traits::RecipeStore;
use crate::recipe::{NewRecipe, Recipe, RecipeId};

/// On-disk shape: `{"recipes": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecipeDocument {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// Recipe store backed by a single JSON document.
///
/// Every write rewrites the whole file. Writers hold `write_lock` for the
/// full read-modify-write cycle, and the new document replaces the old one
/// via rename, so readers never observe a partially written file.
pub struct DocumentRecipeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentRecipeStore {
    /// Open (or lazily create) the document at `path`.
    pub async fn new(path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        info!(path = %path.display(), "Using recipe document store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<RecipeDocument, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RecipeDocument::default());
            }
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(RecipeDocument::default());
        }

        let document: RecipeDocument = serde_json::from_slice(&bytes)?;
        if let Some(bad) = document.recipes.iter().find(|r| r.original_servings == 0) {
            return Err(StorageError::Corrupt(format!(
                "recipe {} has zero original servings",
                bad.id
            )));
        }
        Ok(document)
    }

    /// Temp file next to the document so the final rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recipes");
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }

    async fn write_document(&self, document: &RecipeDocument) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for DocumentRecipeStore {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        let id = match document.recipes.iter().map(|r| r.id).max() {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| StorageError::Corrupt("recipe id space exhausted".into()))?,
            None => 1,
        };
        let recipe = recipe.into_recipe(id);
        document.recipes.push(recipe.clone());
        self.write_document(&document).await?;

        debug!(id, total = document.recipes.len(), "Recipe appended to document");
        Ok(recipe)
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let mut recipes = self.read_document().await?.recipes;
        recipes.sort_by_key(|r| r.id);
        Ok(recipes)
    }

    async fn get_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StorageError> {
        Ok(self
            .read_document()
            .await?
            .recipes
            .into_iter()
            .find(|r| r.id == id))
    }
}
