use std::sync::Arc;

use anyhow::Context;
use recipe_common::RecipeStore;
use recipe_common::storage::{DocumentRecipeStore, MemoryRecipeStore};

use crate::config::{AppConfig, StorageBackend};
use crate::database::init_db;
use crate::store::SqlRecipeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Build the configured recipe store and wrap it with the config.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let storage = &config.storage;
        let store: Arc<dyn RecipeStore> = match storage.backend {
            StorageBackend::Database => {
                let db = init_db(storage)
                    .await
                    .context("Failed to initialize database")?;
                Arc::new(SqlRecipeStore::new(db))
            }
            StorageBackend::Document => Arc::new(
                DocumentRecipeStore::new(storage.document_path.clone())
                    .await
                    .context("Failed to open recipe document")?,
            ),
            StorageBackend::Memory => Arc::new(MemoryRecipeStore::new()),
        };

        tracing::info!(backend = ?storage.backend, "Recipe store ready");
        Ok(Self { store, config })
    }
}
