//! Item endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use vocab_core::types::parse_item_id;
use vocab_core::{find_item, reset_progress, search, to_csv};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/items
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<ItemPage>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<ItemStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let trainer = state.lock()?;
    let matches = search(&trainer.items, query.q.as_deref().unwrap_or(""), status);

    Ok(Json(ItemPage::paginate(matches, query.page.unwrap_or(1))))
}

/// GET /api/items/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Item>> {
    let id = parse_item_id(&id)?;
    let trainer = state.lock()?;

    find_item(&trainer.items, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("item {id}")))
}

/// GET /api/export
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = to_csv(&state.lock()?.items);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"words.csv\""),
        ],
        body,
    ))
}

/// POST /api/reset
///
/// Every item goes back to `new`; the scheduling fields are kept.
pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    let mut trainer = state.lock()?;
    let previous = trainer.items.clone();

    reset_progress(&mut trainer.items);
    if let Err(e) = state.store.save(&trainer.items) {
        trainer.items = previous;
        return Err(e.into());
    }

    tracing::info!(count = trainer.items.len(), "progress reset");
    Ok(Json(ResetResponse {
        reset: trainer.items.len(),
    }))
}
