//! Import endpoints. Both take the raw file content as the request body.

use axum::{extract::State, Json};
use vocab_core::{import_source, parse_lines, parse_tabular, ParsedSource};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/import
pub async fn lines(State(state): State<AppState>, body: String) -> Result<Json<ImportResponse>> {
    import(&state, parse_lines(&body))
}

/// POST /api/import/csv
pub async fn csv(State(state): State<AppState>, body: String) -> Result<Json<ImportResponse>> {
    import(&state, parse_tabular(&body)?)
}

fn import(state: &AppState, source: ParsedSource) -> Result<Json<ImportResponse>> {
    let today = state.today();
    let mut trainer = state.lock()?;
    let before = trainer.items.len();

    let report = import_source(&mut trainer.items, source, today);
    if report.added > 0 {
        if let Err(e) = state.store.save(&trainer.items) {
            trainer.items.truncate(before);
            return Err(e.into());
        }
    }

    tracing::info!(added = report.added, duplicates = report.duplicates, "import finished");
    Ok(Json(ImportResponse {
        total: trainer.items.len(),
        report,
    }))
}
