//! Spaced repetition scheduling.

pub mod sm2;

use crate::types::Item;
use chrono::NaiveDate;

pub use sm2::Sm2;

/// Trait for spaced repetition algorithms working on pass/fail gradings.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Return `item` with its scheduling fields updated after a grading.
    fn schedule(&self, item: &Item, correct: bool, today: NaiveDate) -> Item;
}

/// Grade `item` with the default SM-2 parameters.
pub fn grade(item: &Item, correct: bool, today: NaiveDate) -> Item {
    Sm2::default().schedule(item, correct, today)
}
