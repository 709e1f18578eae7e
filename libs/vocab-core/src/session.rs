//! Review session engine.
//!
//! A session walks a shuffled pool of item ids:
//!
//! ```text
//! SelectingPool -> Presenting -> AwaitingInput -> Grading -> Presenting | Exhausted
//! ```
//!
//! [`ReviewSession::start`] selects the pool, [`ReviewSession::next_prompt`]
//! presents the front item and [`ReviewSession::respond`] grades the driver's
//! response. Wrong, empty and skipped answers go to the back of the pool, so
//! a session only ends once every item was answered correctly or the driver
//! sends [`Control::Exit`]. Drivers wanting a bounded session must cap it
//! themselves.
//!
//! Every grading saves the whole collection before returning.

use crate::algorithm::{SpacedRepetitionAlgorithm, Sm2};
use crate::collection::{find_item, find_item_mut, status_counts};
use crate::error::SessionError;
use crate::matching::is_correct;
use crate::store::ItemStore;
use crate::types::{Direction, Item, ItemStatus, StatusCounts};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// Filters and pins chosen by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Keep only items due today or earlier.
    #[serde(default)]
    pub due_only: bool,
    /// Keep only items currently in `learning`.
    #[serde(default)]
    pub only_wrong: bool,
    /// Review exactly this item, regardless of filters.
    #[serde(default)]
    pub item_id: Option<u64>,
    /// Always quiz in this direction instead of picking at random.
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Ids of the items eligible for review, in collection order.
///
/// Validated items are left out unless `only_wrong` is set, in which case
/// only `learning` items pass anyway.
pub fn select_pool(items: &[Item], due_only: bool, only_wrong: bool, today: NaiveDate) -> Vec<u64> {
    items
        .iter()
        .filter(|item| !only_wrong || item.status == ItemStatus::Learning)
        .filter(|item| !due_only || item.is_due(today))
        .filter(|item| only_wrong || item.status != ItemStatus::Validated)
        .map(|item| item.id)
        .collect()
}

/// Out-of-band commands a driver can send instead of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Exit,
    Skip,
    Show,
    Stats,
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().trim_start_matches(':').to_ascii_lowercase();
        match token.as_str() {
            "exit" | "quit" => Ok(Self::Exit),
            "skip" => Ok(Self::Skip),
            "show" | "reveal" => Ok(Self::Show),
            "stats" | "progress" => Ok(Self::Stats),
            _ => Err(format!("unknown action: {s}")),
        }
    }
}

/// What the driver sends back for the current prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Answer(String),
    Control(Control),
}

impl Response {
    /// Interpret a typed line: `:exit`, `:quit`, `:skip`, `:show` and
    /// `:stats` are controls, anything else is an answer.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with(':') {
            if let Ok(control) = trimmed.parse() {
                return Self::Control(control);
            }
        }
        Self::Answer(trimmed.to_string())
    }
}

/// An item shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub item_id: u64,
    pub direction: Direction,
    pub text: String,
}

/// Result of grading an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    pub given: String,
    pub expected: String,
    /// The item after scheduling.
    pub item: Item,
}

/// Outcome of one [`ReviewSession::respond`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Empty answer; item moved to the back of the pool.
    Requeued,
    /// Item moved to the back of the pool without grading.
    Skipped,
    /// Expected answer revealed; item moved to the back of the pool.
    Revealed { expected: String },
    /// Collection counts; item moved to the back of the pool.
    Progress { counts: StatusCounts },
    /// Answer graded, scheduled and saved.
    Graded(Verdict),
    /// The driver ended the session.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Presenting,
    AwaitingInput,
    Exhausted,
}

/// Totals for a finished or running session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub graded: usize,
    pub correct: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone, Copy)]
struct Presented {
    item_id: u64,
    direction: Direction,
}

/// A running review session. The item collection itself stays with the
/// caller and is passed to each call.
#[derive(Debug)]
pub struct ReviewSession<R> {
    pool: VecDeque<u64>,
    current: Option<Presented>,
    direction: Option<Direction>,
    state: SessionState,
    scheduler: Sm2,
    rng: R,
    graded: usize,
    correct: usize,
}

impl<R: Rng> ReviewSession<R> {
    /// Build the pool for `options` and shuffle it.
    ///
    /// A pinned item id must exist in `items`; otherwise nothing is created.
    pub fn start(
        items: &[Item],
        options: &SessionOptions,
        today: NaiveDate,
        mut rng: R,
    ) -> Result<Self, SessionError> {
        let mut pool = match options.item_id {
            Some(id) => {
                find_item(items, id).ok_or(SessionError::MissingItem(id))?;
                vec![id]
            }
            None => select_pool(items, options.due_only, options.only_wrong, today),
        };
        pool.shuffle(&mut rng);

        tracing::debug!(
            pool = pool.len(),
            due_only = options.due_only,
            only_wrong = options.only_wrong,
            "session started"
        );

        let state = if pool.is_empty() {
            SessionState::Exhausted
        } else {
            SessionState::Presenting
        };

        Ok(Self {
            pool: pool.into(),
            current: None,
            direction: options.direction,
            state,
            scheduler: Sm2::default(),
            rng,
            graded: 0,
            correct: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Items still to be answered correctly, including the one on screen.
    pub fn remaining(&self) -> usize {
        self.pool.len() + usize::from(self.current.is_some())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            graded: self.graded,
            correct: self.correct,
            remaining: self.remaining(),
        }
    }

    /// Present the next item, or `None` once the pool is exhausted.
    ///
    /// While a prompt awaits input, the same prompt is returned again.
    pub fn next_prompt(&mut self, items: &[Item]) -> Option<Prompt> {
        if let Some(presented) = self.current {
            if let Some(item) = find_item(items, presented.item_id) {
                return Some(prompt_for(item, presented.direction));
            }
            self.current = None;
        }

        while let Some(item_id) = self.pool.pop_front() {
            let Some(item) = find_item(items, item_id) else {
                tracing::warn!(item_id, "item left the collection, dropping it from the session");
                continue;
            };

            let direction = self.direction.unwrap_or_else(|| {
                if self.rng.random_bool(0.5) {
                    Direction::AToB
                } else {
                    Direction::BToA
                }
            });
            self.current = Some(Presented { item_id, direction });
            self.state = SessionState::AwaitingInput;
            return Some(prompt_for(item, direction));
        }

        self.state = SessionState::Exhausted;
        None
    }

    /// Handle the driver's response to the current prompt.
    ///
    /// Gradings update the item through the scheduler and save the whole
    /// collection. If the save fails the item is restored and the prompt stays
    /// open, so memory and storage never disagree.
    pub fn respond<S: ItemStore + ?Sized>(
        &mut self,
        items: &mut [Item],
        response: Response,
        today: NaiveDate,
        store: &S,
    ) -> Result<Step, SessionError> {
        let presented = self.current.ok_or(SessionError::NotAwaitingInput)?;
        let item = find_item(items, presented.item_id)
            .ok_or(SessionError::MissingItem(presented.item_id))?;
        let expected = item.expected_form(presented.direction).to_string();

        let answer = match response {
            Response::Control(Control::Exit) => {
                self.current = None;
                self.pool.clear();
                self.state = SessionState::Exhausted;
                return Ok(Step::Ended);
            }
            Response::Control(Control::Skip) => {
                self.requeue(presented);
                return Ok(Step::Skipped);
            }
            Response::Control(Control::Show) => {
                self.requeue(presented);
                return Ok(Step::Revealed { expected });
            }
            Response::Control(Control::Stats) => {
                let counts = status_counts(items);
                self.requeue(presented);
                return Ok(Step::Progress { counts });
            }
            Response::Answer(answer) if answer.trim().is_empty() => {
                self.requeue(presented);
                return Ok(Step::Requeued);
            }
            Response::Answer(answer) => answer,
        };

        let correct = is_correct(&answer, &expected);
        let updated = self.scheduler.schedule(item, correct, today);

        let slot = find_item_mut(items, presented.item_id)
            .ok_or(SessionError::MissingItem(presented.item_id))?;
        let previous = std::mem::replace(slot, updated.clone());

        if let Err(e) = store.save(items) {
            if let Some(slot) = find_item_mut(items, presented.item_id) {
                *slot = previous;
            }
            return Err(e.into());
        }

        tracing::debug!(
            item_id = presented.item_id,
            correct,
            interval = updated.interval,
            algorithm = self.scheduler.name(),
            "graded answer"
        );

        self.graded += 1;
        if correct {
            self.correct += 1;
            self.current = None;
            self.state = if self.pool.is_empty() {
                SessionState::Exhausted
            } else {
                SessionState::Presenting
            };
        } else {
            self.requeue(presented);
        }

        Ok(Step::Graded(Verdict {
            correct,
            given: answer,
            expected,
            item: updated,
        }))
    }

    /// End the session and save the collection one last time.
    pub fn finish<S: ItemStore + ?Sized>(
        mut self,
        items: &[Item],
        store: &S,
    ) -> Result<SessionSummary, SessionError> {
        store.save(items)?;
        self.state = SessionState::Exhausted;
        let summary = self.summary();
        tracing::debug!(graded = summary.graded, correct = summary.correct, "session finished");
        Ok(summary)
    }

    fn requeue(&mut self, presented: Presented) {
        self.current = None;
        self.pool.push_back(presented.item_id);
        self.state = SessionState::Presenting;
    }
}

fn prompt_for(item: &Item, direction: Direction) -> Prompt {
    Prompt {
        item_id: item.id,
        direction,
        text: item.prompt_form(direction).to_string(),
    }
}
