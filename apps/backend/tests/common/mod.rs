//! Common test utilities for integration tests.
//!
//! Each `TestContext` owns a temporary directory holding the JSON store, so
//! tests never share data.

#![allow(dead_code)]

pub mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;
use tempfile::TempDir;

use vocab_core::dates::adjusted_today;
use vocab_core::{FormLabels, Item, ItemStore, JsonFileStore};
use vocab_trainer_web::{build_router, AppState, DEFAULT_MAX_SESSIONS};

/// Test context with a file-backed store in a temporary directory.
pub struct TestContext {
    _dir: TempDir,
    pub path: PathBuf,
    pub state: AppState,
}

impl TestContext {
    /// Create a context with an empty collection.
    pub fn new() -> Self {
        Self::with_items(&[])
    }

    /// Create a context whose store already holds `items`.
    pub fn with_items(items: &[Item]) -> Self {
        Self::with_session_cap(items, DEFAULT_MAX_SESSIONS)
    }

    /// Like `with_items`, keeping at most `max_sessions` live sessions.
    pub fn with_session_cap(items: &[Item], max_sessions: usize) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("words.json");

        let store = JsonFileStore::new(&path);
        if !items.is_empty() {
            store.save(items).expect("Failed to seed store");
        }

        let state = AppState::load_with_cap(Arc::new(store), FormLabels::default(), 0, max_sessions)
            .expect("Failed to load state");

        Self {
            _dir: dir,
            path,
            state,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Number of sessions the server still tracks.
    pub fn live_sessions(&self) -> usize {
        self.state
            .trainer
            .lock()
            .expect("Failed to lock trainer")
            .session_count()
    }

    /// Items as currently saved on disk.
    pub fn saved_items(&self) -> Vec<Item> {
        JsonFileStore::new(&self.path)
            .load(today())
            .expect("Failed to read store")
    }
}

pub fn today() -> NaiveDate {
    adjusted_today(0)
}
