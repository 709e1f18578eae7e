//! SM-2 spaced repetition algorithm.
//!
//! Simplified SuperMemo 2 for binary gradings: a correct answer counts as a
//! perfect recall (quality 5), a wrong answer resets the streak.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Item, ItemStatus, MINIMUM_EASE, VALIDATION_STREAK};
use chrono::{Days, NaiveDate};

/// Recall quality assumed for every correct answer.
const PERFECT_QUALITY: f64 = 5.0;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    pub lapse_penalty: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub validation_streak: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: MINIMUM_EASE,
            lapse_penalty: 0.2,
            first_interval: 1,
            second_interval: 6,
            validation_streak: VALIDATION_STREAK,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn schedule(&self, item: &Item, correct: bool, today: NaiveDate) -> Item {
        let (status, interval, ease, repetitions) = if correct {
            self.schedule_recall(item)
        } else {
            self.schedule_lapse(item)
        };

        Item {
            status,
            interval,
            ease_factor: round_ease(ease),
            repetitions,
            due_date: today
                .checked_add_days(Days::new(u64::from(interval)))
                .unwrap_or(NaiveDate::MAX),
            ..item.clone()
        }
    }
}

impl Sm2 {
    fn schedule_recall(&self, item: &Item) -> (ItemStatus, u32, f64, u32) {
        let repetitions = item.repetitions.saturating_add(1);
        let interval = match repetitions {
            1 => self.first_interval,
            2 => self.second_interval,
            // Grows by the ease factor in effect before this review.
            _ => {
                let grown = (f64::from(item.interval) * item.ease_factor).round_ties_even();
                (grown.min(f64::from(u32::MAX)) as u32).max(1)
            }
        };

        let ease = (item.ease_factor + quality_adjustment(PERFECT_QUALITY)).max(self.minimum_ease);
        let status = if repetitions >= self.validation_streak {
            ItemStatus::Validated
        } else {
            ItemStatus::Learning
        };

        (status, interval, ease, repetitions)
    }

    fn schedule_lapse(&self, item: &Item) -> (ItemStatus, u32, f64, u32) {
        let ease = (item.ease_factor - self.lapse_penalty).max(self.minimum_ease);
        (ItemStatus::Learning, self.first_interval, ease, 0)
    }
}

/// Standard SM-2 ease delta for a recall of quality `q` (0-5).
fn quality_adjustment(q: f64) -> f64 {
    0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

/// Round to two decimals so stored values stay stable.
fn round_ease(ease: f64) -> f64 {
    (ease * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn new_item() -> Item {
        Item::new(1, "dog", "chien", today())
    }

    #[test]
    fn three_correct_answers_validate() {
        let sm2 = Sm2::default();
        let mut item = new_item();
        let mut intervals = Vec::new();

        for _ in 0..3 {
            item = sm2.schedule(&item, true, today());
            intervals.push(item.interval);
        }

        assert_eq!(item.repetitions, 3);
        assert_eq!(item.status, ItemStatus::Validated);
        // Third interval is round(6 * 2.7).
        assert_eq!(intervals, vec![1, 6, 16]);
        assert_eq!(item.ease_factor, 2.8);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
    }

    #[test]
    fn first_correct_answer_is_learning() {
        let item = Sm2::default().schedule(&new_item(), true, today());
        assert_eq!(item.status, ItemStatus::Learning);
        assert_eq!(item.interval, 1);
        assert_eq!(item.ease_factor, 2.6);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn lapse_after_two_correct_resets() {
        let sm2 = Sm2::default();
        let mut item = new_item();
        item = sm2.schedule(&item, true, today());
        item = sm2.schedule(&item, true, today());
        item = sm2.schedule(&item, false, today());

        assert_eq!(item.repetitions, 0);
        assert_eq!(item.interval, 1);
        assert_eq!(item.status, ItemStatus::Learning);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.due_date, today().succ_opt().unwrap());
    }

    #[test]
    fn ease_factor_never_below_minimum() {
        let sm2 = Sm2::default();
        let mut item = Item {
            ease_factor: 1.4,
            ..new_item()
        };
        for _ in 0..5 {
            item = sm2.schedule(&item, false, today());
            assert!(item.ease_factor >= sm2.minimum_ease);
        }
        assert_eq!(item.ease_factor, 1.3);
    }

    #[test]
    fn repeated_correct_answers_keep_growing() {
        let sm2 = Sm2::default();
        let mut item = Item {
            ease_factor: 1.3,
            ..new_item()
        };
        let mut previous = item.clone();
        for _ in 0..8 {
            item = sm2.schedule(&item, true, today());
            assert!(item.repetitions > previous.repetitions);
            assert!(item.ease_factor >= previous.ease_factor);
            assert!(item.interval >= 1);
            previous = item.clone();
        }
    }

    #[test]
    fn interval_rounds_half_to_even() {
        // 6 * 2.75 = 16.5, resolved to the even neighbour.
        let item = Item {
            repetitions: 2,
            interval: 6,
            ease_factor: 2.75,
            ..new_item()
        };
        assert_eq!(Sm2::default().schedule(&item, true, today()).interval, 16);
    }

    #[test]
    fn identity_fields_untouched() {
        let item = new_item();
        let graded = grade_twice(&item);
        assert_eq!(graded.id, item.id);
        assert_eq!(graded.form_a, item.form_a);
        assert_eq!(graded.form_b, item.form_b);
    }

    fn grade_twice(item: &Item) -> Item {
        let once = crate::algorithm::grade(item, false, today());
        crate::algorithm::grade(&once, true, today())
    }

    #[test]
    fn quality_five_adds_a_tenth() {
        assert!((quality_adjustment(PERFECT_QUALITY) - 0.1).abs() < f64::EPSILON);
    }
}
