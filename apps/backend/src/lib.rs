pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use vocab_core::dates::adjusted_today;
use vocab_core::{FormLabels, Item, ItemStore, JsonFileStore, ReviewSession, StoreError};

use crate::config::Config;
use crate::error::ApiError;

/// Live sessions kept unless `VOCAB_MAX_SESSIONS` says otherwise.
pub const DEFAULT_MAX_SESSIONS: usize = 64;

/// The item collection and the running sessions. All writes go through one
/// lock so every save sees a consistent collection.
pub struct Trainer {
    pub items: Vec<Item>,
    sessions: HashMap<Uuid, ReviewSession<StdRng>>,
    started: VecDeque<Uuid>,
    max_sessions: usize,
}

impl Trainer {
    pub fn new(items: Vec<Item>, max_sessions: usize) -> Self {
        Self {
            items,
            sessions: HashMap::new(),
            started: VecDeque::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Track a new session, dropping the oldest ones past the cap.
    pub fn insert_session(&mut self, id: Uuid, session: ReviewSession<StdRng>) {
        while self.sessions.len() >= self.max_sessions {
            let Some(oldest) = self.started.pop_front() else {
                break;
            };
            if self.sessions.remove(&oldest).is_some() {
                tracing::warn!(session_id = %oldest, "evicted idle session");
            }
        }
        self.sessions.insert(id, session);
        self.started.push_back(id);
    }

    pub fn remove_session(&mut self, id: &Uuid) -> Option<ReviewSession<StdRng>> {
        let session = self.sessions.remove(id)?;
        self.started.retain(|started| started != id);
        Some(session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub trainer: Arc<Mutex<Trainer>>,
    pub labels: Arc<FormLabels>,
    pub reset_hour: u32,
}

impl AppState {
    /// Load the collection from `store`.
    pub fn load(
        store: Arc<dyn ItemStore>,
        labels: FormLabels,
        reset_hour: u32,
    ) -> Result<Self, StoreError> {
        Self::load_with_cap(store, labels, reset_hour, DEFAULT_MAX_SESSIONS)
    }

    /// Load the collection, keeping at most `max_sessions` live sessions.
    pub fn load_with_cap(
        store: Arc<dyn ItemStore>,
        labels: FormLabels,
        reset_hour: u32,
        max_sessions: usize,
    ) -> Result<Self, StoreError> {
        let items = store.load(adjusted_today(reset_hour))?;
        tracing::info!(count = items.len(), max_sessions, "loaded vocabulary");

        Ok(Self {
            store,
            trainer: Arc::new(Mutex::new(Trainer::new(items, max_sessions))),
            labels: Arc::new(labels),
            reset_hour,
        })
    }

    /// Today's study date.
    pub fn today(&self) -> NaiveDate {
        adjusted_today(self.reset_hour)
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Trainer>, ApiError> {
        self.trainer
            .lock()
            .map_err(|_| ApiError::Internal("trainer state lock poisoned".to_string()))
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/stats", get(routes::stats::summary))
        .route("/api/stats/status_counts", get(routes::stats::status_counts_map))
        .route("/api/items", get(routes::items::list))
        .route("/api/items/:id", get(routes::items::get))
        .route("/api/import", post(routes::import::lines))
        .route("/api/import/csv", post(routes::import::csv))
        .route("/api/export", get(routes::items::export))
        .route("/api/reset", post(routes::items::reset))
        .route("/api/sessions", post(routes::sessions::start))
        .route("/api/sessions/:id/respond", post(routes::sessions::respond))
        .route("/api/sessions/:id", delete(routes::sessions::end))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(path = %config.data_path.display(), "Opening vocabulary store...");
    let store = Arc::new(JsonFileStore::new(&config.data_path));
    let state = AppState::load_with_cap(
        store,
        config.labels.clone(),
        config.reset_hour,
        config.max_sessions,
    )?;

    let app = build_router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
