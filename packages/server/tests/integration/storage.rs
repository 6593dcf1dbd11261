use std::collections::HashSet;
use std::sync::Arc;

use recipe_server::config::StorageBackend;
use serde_json::json;

use crate::common::{TestApp, pancakes, routes};

async fn scenario_round_trip(backend: StorageBackend) {
    let app = TestApp::spawn_with(backend).await;
    let id = app.create_recipe(&pancakes()).await;

    let stored = app.get(&routes::recipe(id)).await;
    assert_eq!(stored.status, 200);
    assert_eq!(stored.body["ingredients"][1]["name"], "Eggs");

    let scaled = app.get(&routes::scale(id, "8")).await;
    assert_eq!(scaled.status, 200);
    assert_eq!(scaled.body["ingredients"][0]["quantity"], "400.00 g");
    assert_eq!(scaled.body["ingredients"][1]["quantity"], "4.00 ");

    let missing = app.get(&routes::scale(id + 1000, "8")).await;
    assert_eq!(missing.status, 404);
}

async fn concurrent_creates(backend: StorageBackend) {
    const N: usize = 20;
    let app = Arc::new(TestApp::spawn_with(backend).await);

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                app.create_recipe(&json!({
                    "name": format!("Recipe {i}"),
                    "original_servings": 2,
                    "ingredients": [{"quantity": "100g", "name": "Rice"}]
                }))
                .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }

    let res = app.get(routes::RECIPES).await;
    let listed = res.body.as_array().unwrap();
    assert_eq!(listed.len(), N);
    let listed_ids: HashSet<_> = listed.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(listed_ids, ids);
}

mod document_backend {
    use super::*;

    #[tokio::test]
    async fn create_get_and_scale() {
        scenario_round_trip(StorageBackend::Document).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_lose_no_writes() {
        concurrent_creates(StorageBackend::Document).await;
    }
}

mod database_backend {
    use super::*;

    #[tokio::test]
    async fn create_get_and_scale() {
        scenario_round_trip(StorageBackend::Database).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_lose_no_writes() {
        concurrent_creates(StorageBackend::Database).await;
    }

    #[tokio::test]
    async fn ingredient_order_survives_storage() {
        let app = TestApp::spawn_with(StorageBackend::Database).await;
        let ingredients: Vec<_> = (0..12)
            .map(|i| json!({"quantity": format!("{i} g"), "name": format!("Item {i}")}))
            .collect();
        let id = app
            .create_recipe(&json!({
                "name": "Long list",
                "original_servings": 1,
                "ingredients": ingredients
            }))
            .await;
        app.create_recipe(&pancakes()).await;

        let res = app.get(routes::RECIPES).await;
        let first = &res.body[0];
        assert_eq!(first["id"], id);
        let names: Vec<_> = first["ingredients"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<_> = (0..12).map(|i| format!("Item {i}")).collect();
        assert_eq!(names, expected);
    }
}

mod storage_failures {
    use super::*;

    #[tokio::test]
    async fn unreadable_store_is_500_without_details() {
        let app = TestApp::spawn_with(StorageBackend::Document).await;
        std::fs::write(app.document_path(), "{ not json").unwrap();

        let responses = [
            app.get(routes::RECIPES).await,
            app.post(routes::RECIPES, &pancakes()).await,
            app.get(&routes::recipe(1)).await,
            app.get(&routes::scale(1, "2")).await,
        ];

        for res in responses {
            assert_eq!(res.status, 500, "body: {}", res.text);
            assert_eq!(res.body["code"], "INTERNAL_ERROR");
            assert_eq!(res.body["error"], "An unexpected error occurred");
            assert!(!res.text.contains("serialize"));
            assert!(!res.text.contains("recipes.json"));
        }
    }

    #[tokio::test]
    async fn validation_still_wins_over_a_broken_store() {
        let app = TestApp::spawn_with(StorageBackend::Document).await;
        std::fs::write(app.document_path(), "{ not json").unwrap();

        let res = app.get(&routes::scale(1, "0")).await;

        assert_eq!(res.status, 400);
    }
}
