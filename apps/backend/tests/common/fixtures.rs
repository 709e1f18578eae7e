//! Test fixtures and factory functions for creating test data.

use chrono::Duration;
use vocab_core::{Item, ItemStatus};

use super::today;

/// Line-format source with `n` distinct pairs.
pub fn sample_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("word{i} : mot{i}\n"))
        .collect()
}

/// A small collection covering every status.
///
/// - 1 dog/chien: new, due today
/// - 2 cat/chat: learning, due yesterday
/// - 3 bird/oiseau: learning, due in 4 days
/// - 4 fish/poisson: validated, due in 10 days
pub fn seeded_items() -> Vec<Item> {
    vec![
        item(1, "dog", "chien", ItemStatus::New, 0),
        item(2, "cat", "chat", ItemStatus::Learning, -1),
        item(3, "bird", "oiseau", ItemStatus::Learning, 4),
        item(4, "fish", "poisson", ItemStatus::Validated, 10),
    ]
}

pub fn item(id: u64, form_a: &str, form_b: &str, status: ItemStatus, due_in: i64) -> Item {
    let mut item = Item::new(id, form_a, form_b, today());
    item.status = status;
    item.due_date = today() + Duration::days(due_in);
    match status {
        ItemStatus::New => {}
        ItemStatus::Learning => {
            item.repetitions = 1;
            item.interval = 1;
        }
        ItemStatus::Validated => {
            item.repetitions = 3;
            item.interval = 16;
        }
    }
    item
}
