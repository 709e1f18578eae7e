//! Core types for the vocabulary trainer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Ease factor assigned to freshly imported items.
pub const INITIAL_EASE: f64 = 2.5;

/// Lower bound for the ease factor.
pub const MINIMUM_EASE: f64 = 1.3;

/// Consecutive correct gradings needed before an item counts as validated.
pub const VALIDATION_STREAK: u32 = 3;

/// Item learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    New,
    Learning,
    Validated,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Validated => "validated",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "learning" => Ok(Self::Learning),
            "validated" => Ok(Self::Validated),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// One vocabulary pair with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub form_a: String,
    pub form_b: String,
    pub status: ItemStatus,
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub due_date: NaiveDate,
}

impl Item {
    /// Create a new item with default scheduling fields, due on `today`.
    pub fn new(id: u64, form_a: impl Into<String>, form_b: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id,
            form_a: form_a.into(),
            form_b: form_b.into(),
            status: ItemStatus::New,
            ease_factor: INITIAL_EASE,
            interval: 0,
            repetitions: 0,
            due_date: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }

    /// The form shown to the learner for `direction`.
    pub fn prompt_form(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => &self.form_a,
            Direction::BToA => &self.form_b,
        }
    }

    /// The form the learner has to produce for `direction`.
    pub fn expected_form(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => &self.form_b,
            Direction::BToA => &self.form_a,
        }
    }
}

/// Pair read from an import source, before it becomes an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    pub form_a: String,
    pub form_b: String,
    pub line_number: usize,
}

impl RawPair {
    /// Trim both sides; `None` if either is empty.
    pub fn new(form_a: &str, form_b: &str, line_number: usize) -> Option<Self> {
        let (form_a, form_b) = (form_a.trim(), form_b.trim());
        if form_a.is_empty() || form_b.is_empty() {
            return None;
        }
        Some(Self {
            form_a: form_a.to_string(),
            form_b: form_b.to_string(),
            line_number,
        })
    }
}

/// Quiz direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show `form_a`, expect `form_b`.
    AToB,
    /// Show `form_b`, expect `form_a`.
    BToA,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AToB => "a_to_b",
            Self::BToA => "b_to_a",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a_to_b" | "a2b" | "ab" | "en2fr" => Ok(Self::AToB),
            "b_to_a" | "b2a" | "ba" | "fr2en" => Ok(Self::BToA),
            _ => Err(SessionError::InvalidDirection(s.to_string())),
        }
    }
}

/// Parse an item id supplied by a driver.
pub fn parse_item_id(raw: &str) -> Result<u64, SessionError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SessionError::InvalidId(raw.to_string()))
}

/// Display names for the two forms, e.g. "English" and "French".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLabels {
    pub form_a: String,
    pub form_b: String,
}

impl Default for FormLabels {
    fn default() -> Self {
        Self {
            form_a: "English".to_string(),
            form_b: "French".to_string(),
        }
    }
}

impl FormLabels {
    /// Label of the language the learner answers in.
    pub fn target(&self, direction: Direction) -> &str {
        match direction {
            Direction::AToB => &self.form_b,
            Direction::BToA => &self.form_a,
        }
    }
}

/// Item counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub new: usize,
    pub learning: usize,
    pub validated: usize,
    pub total: usize,
}
