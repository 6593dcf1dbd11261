use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;

use recipe_server::config::{
    AppConfig, CorsConfig, ServerConfig, StorageBackend, StorageConfig,
};
use recipe_server::state::AppState;

pub mod routes {
    pub const RECIPES: &str = "/api/recipes";

    pub fn recipe(id: impl std::fmt::Display) -> String {
        format!("/api/recipes/{id}")
    }

    pub fn scale(id: impl std::fmt::Display, servings: &str) -> String {
        format!("/api/recipes/{id}/scale?servings={servings}")
    }

    pub fn scale_without_servings(id: impl std::fmt::Display) -> String {
        format!("/api/recipes/{id}/scale")
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Holds on-disk stores and static files for the lifetime of the test.
    dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    /// Spawn a server over an in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(StorageBackend::Memory).await
    }

    /// Spawn a server over the given backend, with on-disk data in a temp dir.
    pub async fn spawn_with(backend: StorageBackend) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self::spawn_in(dir, backend, None).await
    }

    /// Spawn an in-memory server that also serves `files` as static client assets.
    pub async fn spawn_serving(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let public = dir.path().join("public");
        std::fs::create_dir_all(&public).expect("Failed to create static dir");
        for (name, content) in files {
            std::fs::write(public.join(name), content).expect("Failed to write static file");
        }
        Self::spawn_in(dir, StorageBackend::Memory, Some(public)).await
    }

    async fn spawn_in(dir: TempDir, backend: StorageBackend, static_dir: Option<PathBuf>) -> Self {
        let db_path: PathBuf = dir.path().join("recipes.db");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig::default(),
                static_dir,
            },
            storage: StorageConfig {
                backend,
                database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
                document_path: dir.path().join("recipes.json"),
                max_connections: 1,
            },
        };

        let state = AppState::from_config(app_config)
            .await
            .expect("Failed to build app state");
        let app = recipe_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            dir,
        }
    }

    /// Path of the JSON document used by the document backend.
    pub fn document_path(&self) -> PathBuf {
        self.dir.path().join("recipes.json")
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// Create a recipe and return its assigned id.
    pub async fn create_recipe(&self, body: &Value) -> i64 {
        let res = self.post(routes::RECIPES, body).await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        res.body["id"].as_i64().expect("id should be a number")
    }
}

pub fn pancakes() -> Value {
    serde_json::json!({
        "name": "Pancakes",
        "original_servings": 4,
        "ingredients": [
            {"quantity": "200g", "name": "Flour"},
            {"quantity": "2", "name": "Eggs"}
        ]
    })
}
