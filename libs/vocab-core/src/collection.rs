//! Operations over the whole item collection.
//!
//! The collection is a plain `Vec<Item>` owned by the caller; every function
//! here takes it explicitly.

use crate::error::ParseError;
use crate::normalize::normalize;
use crate::parser::ParsedSource;
use crate::types::{Item, ItemStatus, StatusCounts};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of importing a parsed source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    #[serde(serialize_with = "serialize_diagnostics")]
    pub diagnostics: Vec<ParseError>,
}

fn serialize_diagnostics<S>(diagnostics: &[ParseError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(diagnostics.iter().map(ToString::to_string))
}

/// Next unused id: one past the largest id in the collection.
pub fn next_id(items: &[Item]) -> u64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

fn dedup_key(form_a: &str, form_b: &str) -> (String, String) {
    (normalize(form_a), normalize(form_b))
}

/// Append the pairs of `source` as new items due `today`, skipping pairs that
/// match an existing item or one added earlier from the same source.
pub fn import_source(items: &mut Vec<Item>, source: ParsedSource, today: NaiveDate) -> ImportReport {
    let mut seen: HashSet<(String, String)> = items
        .iter()
        .map(|item| dedup_key(&item.form_a, &item.form_b))
        .collect();
    let mut id = next_id(items);
    let mut report = ImportReport {
        diagnostics: source.diagnostics,
        ..ImportReport::default()
    };

    for pair in source.pairs {
        if !seen.insert(dedup_key(&pair.form_a, &pair.form_b)) {
            tracing::debug!(line = pair.line_number, form_a = %pair.form_a, "skipping duplicate pair");
            report.duplicates += 1;
            continue;
        }
        items.push(Item::new(id, pair.form_a, pair.form_b, today));
        id += 1;
        report.added += 1;
    }

    tracing::debug!(
        added = report.added,
        duplicates = report.duplicates,
        skipped = report.diagnostics.len(),
        "imported source"
    );
    report
}

/// Count items per status.
pub fn status_counts(items: &[Item]) -> StatusCounts {
    items.iter().fold(
        StatusCounts {
            total: items.len(),
            ..StatusCounts::default()
        },
        |mut counts, item| {
            match item.status {
                ItemStatus::New => counts.new += 1,
                ItemStatus::Learning => counts.learning += 1,
                ItemStatus::Validated => counts.validated += 1,
            }
            counts
        },
    )
}

/// Number of items due on or before `today`.
pub fn due_count(items: &[Item], today: NaiveDate) -> usize {
    items.iter().filter(|item| item.is_due(today)).count()
}

/// Mark every item as new again. Scheduling fields are left as they are.
pub fn reset_progress(items: &mut [Item]) {
    for item in items.iter_mut() {
        item.status = ItemStatus::New;
    }
}

pub fn find_item(items: &[Item], id: u64) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

pub fn find_item_mut(items: &mut [Item], id: u64) -> Option<&mut Item> {
    items.iter_mut().find(|item| item.id == id)
}

/// Items whose forms contain `query` (case-insensitive) and, if given, whose
/// status matches.
pub fn search<'a>(items: &'a [Item], query: &str, status: Option<ItemStatus>) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            query.is_empty()
                || item.form_a.to_lowercase().contains(&query)
                || item.form_b.to_lowercase().contains(&query)
        })
        .filter(|item| status.map_or(true, |s| item.status == s))
        .collect()
}
