//! Stats endpoints

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use vocab_core::{due_count, status_counts};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/stats
pub async fn summary(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let today = state.today();
    let trainer = state.lock()?;

    Ok(Json(StatsResponse {
        counts: status_counts(&trainer.items),
        due: due_count(&trainer.items, today),
        labels: (*state.labels).clone(),
    }))
}

/// GET /api/stats/status_counts
pub async fn status_counts_map(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<&'static str, usize>>> {
    let counts = status_counts(&state.lock()?.items);

    Ok(Json(BTreeMap::from([
        (ItemStatus::New.as_str(), counts.new),
        (ItemStatus::Learning.as_str(), counts.learning),
        (ItemStatus::Validated.as_str(), counts.validated),
        ("total", counts.total),
    ])))
}
