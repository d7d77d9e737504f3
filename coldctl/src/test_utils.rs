//! Shared helpers for integration-style tests.

use std::sync::Arc;

use crate::db::memory::InMemoryStore;
use crate::{AppState, Config, build_router};

/// Test server over the full router, backed by the in-memory store.
pub async fn create_test_server() -> axum_test::TestServer {
    let state = AppState {
        store: Arc::new(InMemoryStore::new()),
        config: Config::default(),
    };
    let router = build_router(state).expect("Failed to build router");
    axum_test::TestServer::new(router).expect("Failed to create test server")
}
