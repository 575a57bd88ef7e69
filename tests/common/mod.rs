use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use cafebot::bot::Dispatcher;
use cafebot::config::BotConfig;
use cafebot::game::Catalog;
use cafebot::server::{AppState, create_router};
use cafebot::store::{SqliteStore, Store};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_ID: i64 = 777;

pub struct TestApp {
    pub temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = BotConfig {
            data_dir: temp_dir.path().to_path_buf(),
            admin_id: Some(ADMIN_ID),
            ..BotConfig::default()
        };

        let store = SqliteStore::new(config.db_path()).expect("open store");
        store.initialize().expect("initialize store");
        store
            .seed_catalog(&Catalog::default())
            .expect("seed catalog");
        let store = Arc::new(store);

        let state = Arc::new(AppState::new(Dispatcher::new(store.clone(), &config)));

        Self {
            temp_dir,
            store,
            router: create_router(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::get(path).body(Body::empty()).expect("build request");
        self.send(request).await
    }

    /// Sends a chat message and returns the reply's `data` object.
    pub async fn say(&self, user_id: i64, text: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/api/v1/updates",
                serde_json::json!({ "user_id": user_id, "text": text }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected response: {body}");
        body["data"].clone()
    }

    /// Presses an inline button and returns the reply's `data` object.
    pub async fn press(&self, user_id: i64, callback: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/api/v1/updates",
                serde_json::json!({ "user_id": user_id, "callback": callback }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected response: {body}");
        body["data"].clone()
    }
}
