//! Review session endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;
use vocab_core::{Control, Response, ReviewSession, SessionOptions};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>> {
    let direction = payload
        .direction
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(str::parse::<Direction>)
        .transpose()?;
    let options = SessionOptions {
        due_only: payload.due_only,
        only_wrong: payload.only_wrong,
        item_id: payload.item_id,
        direction,
    };

    let today = state.today();
    let mut trainer = state.lock()?;
    let mut session = ReviewSession::start(&trainer.items, &options, today, StdRng::from_os_rng())?;

    let session_id = Uuid::new_v4();
    let prompt = session.next_prompt(&trainer.items);
    let summary = session.summary();
    let done = prompt.is_none();
    if !done {
        trainer.insert_session(session_id, session);
    }

    tracing::info!(%session_id, remaining = summary.remaining, "session started");
    Ok(Json(SessionResponse {
        session_id,
        step: None,
        prompt: prompt.map(|p| PromptView::new(p, &state.labels)),
        summary,
        done,
    }))
}

/// POST /api/sessions/:id/respond
pub async fn respond(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<RespondRequest>,
) -> Result<Json<SessionResponse>> {
    let response = match (payload.action.as_deref(), payload.answer) {
        (Some(action), _) => Response::Control(action.parse::<Control>().map_err(ApiError::BadRequest)?),
        (None, Some(answer)) => Response::Answer(answer),
        (None, None) => Response::Answer(String::new()),
    };

    let today = state.today();
    let mut guard = state.lock()?;
    let trainer = &mut *guard;
    let session = trainer
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("session {session_id}")))?;

    let step = session.respond(&mut trainer.items, response, today, state.store.as_ref())?;
    let prompt = session.next_prompt(&trainer.items);
    let mut summary = session.summary();
    let done = prompt.is_none();
    if done {
        if let Some(session) = trainer.remove_session(&session_id) {
            summary = session.finish(&trainer.items, state.store.as_ref())?;
        }
        tracing::info!(%session_id, graded = summary.graded, "session over");
    }

    Ok(Json(SessionResponse {
        session_id,
        step: Some(step),
        prompt: prompt.map(|p| PromptView::new(p, &state.labels)),
        summary,
        done,
    }))
}

/// DELETE /api/sessions/:id
pub async fn end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let mut trainer = state.lock()?;
    let session = trainer
        .remove_session(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("session {session_id}")))?;

    let summary = session.finish(&trainer.items, state.store.as_ref())?;

    tracing::info!(%session_id, graded = summary.graded, "session ended");
    Ok(Json(SessionResponse {
        session_id,
        step: Some(Step::Ended),
        prompt: None,
        summary,
        done: true,
    }))
}
