#![allow(dead_code)]

use axum_test::TestServer;
use memoria::api;
use memoria::auth::JwtAuth;
use memoria::db;
use memoria::state::AppState;
use rusqlite::Connection;
use serde_json::{json, Value};

pub const SECRET: &str = "test-secret-key-for-jwt";

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// App state over an in-memory database, verifying tokens with [`SECRET`].
pub fn test_state() -> AppState {
    AppState::new(test_db(), JwtAuth::new(SECRET))
}

/// Spin up the full router (auth, CORS, tracing) in an in-process test server.
pub fn test_server() -> (TestServer, AppState) {
    let state = test_state();
    let server = TestServer::new(api::router(state.clone())).unwrap();
    (server, state)
}

/// A valid one-hour token for `sub`.
pub fn token_for(sub: &str) -> String {
    JwtAuth::new(SECRET).issue(sub, None, None, 1).unwrap()
}

pub fn memory_body(content: &str, is_public: Option<Value>) -> Value {
    let mut body = json!({"content": content, "coverUrl": "http://x/y.png"});
    if let Some(flag) = is_public {
        body["isPublic"] = flag;
    }
    body
}

/// Create a memory as `sub` through the API and return the response body.
pub async fn create_as(server: &TestServer, sub: &str, content: &str, is_public: bool) -> Value {
    let response = server
        .post("/memories")
        .authorization_bearer(token_for(sub))
        .json(&memory_body(content, Some(json!(is_public))))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}
