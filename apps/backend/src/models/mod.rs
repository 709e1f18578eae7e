//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use vocab_core::{
    Direction, FormLabels, ImportReport, Item, ItemStatus, Prompt, SessionSummary, StatusCounts,
    Step,
};

/// Items per page of `GET /api/items`.
pub const PAGE_SIZE: usize = 20;

// === Stats ===

/// GET /api/stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub due: usize,
    pub labels: FormLabels,
}

// === Items ===

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// One page of a filtered item listing. `page` is 1-based and always within
/// `1..=pages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
    pub per_page: usize,
}

impl ItemPage {
    pub fn paginate(matches: Vec<&Item>, requested: usize) -> Self {
        let total = matches.len();
        let pages = total.div_ceil(PAGE_SIZE).max(1);
        let page = requested.clamp(1, pages);

        let items = matches
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        Self {
            items,
            page,
            pages,
            total,
            per_page: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub reset: usize,
}

// === Import ===

#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    #[serde(flatten)]
    pub report: ImportReport,
    pub total: usize,
}

// === Sessions ===

/// POST /api/sessions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub due_only: bool,
    #[serde(default)]
    pub only_wrong: bool,
    pub item_id: Option<u64>,
    /// Any accepted direction spelling, e.g. `a_to_b` or `fr2en`.
    pub direction: Option<String>,
}

/// POST /api/sessions/:id/respond
///
/// `action` takes precedence over `answer` when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespondRequest {
    pub answer: Option<String>,
    pub action: Option<String>,
}

/// A prompt as shown to the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptView {
    pub item_id: u64,
    pub direction: Direction,
    pub text: String,
    /// Label of the language to answer in.
    pub target: String,
    /// Full question line, e.g. `Translate to French: dog`.
    pub question: String,
}

impl PromptView {
    pub fn new(prompt: Prompt, labels: &FormLabels) -> Self {
        let target = labels.target(prompt.direction).to_string();
        let question = format!("Translate to {}: {}", target, prompt.text);
        Self {
            item_id: prompt.item_id,
            direction: prompt.direction,
            text: prompt.text,
            target,
            question,
        }
    }
}

/// Returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    /// Outcome of the last response, absent when the session was just started.
    pub step: Option<Step>,
    /// Next prompt, absent once the session is over.
    pub prompt: Option<PromptView>,
    pub summary: SessionSummary,
    pub done: bool,
}
