use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    /// Preflight cache lifetime in seconds. Default: 3600.
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Directory of static client files served for non-API paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Which `RecipeStore` implementation backs the server.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Relational tables via sea-orm (SQLite or PostgreSQL URL).
    Database,
    /// Single JSON document on disk.
    Document,
    /// Process memory; nothing survives a restart.
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
    pub document_path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("storage.backend", "database")?
            .set_default("storage.database_url", "sqlite://recipes.db?mode=rwc")?
            .set_default("storage.document_path", "recipes.json")?
            .set_default("storage.max_connections", 5)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., RECIPES__STORAGE__BACKEND=document)
            .add_source(Environment::with_prefix("RECIPES").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
