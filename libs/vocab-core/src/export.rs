//! CSV export of the full collection.

use crate::tabular::write_record;
use crate::types::Item;

/// Column order of exported files.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "id",
    "form_a",
    "form_b",
    "status",
    "ease_factor",
    "interval",
    "repetitions",
    "due_date",
];

/// Render every item, scheduling fields included, as CSV with a header row.
pub fn to_csv(items: &[Item]) -> String {
    let mut out = write_record(&EXPORT_COLUMNS);
    out.push('\n');

    for item in items {
        let row = [
            item.id.to_string(),
            item.form_a.clone(),
            item.form_b.clone(),
            item.status.to_string(),
            item.ease_factor.to_string(),
            item.interval.to_string(),
            item.repetitions.to_string(),
            item.due_date.format("%Y-%m-%d").to_string(),
        ];
        out.push_str(&write_record(&row));
        out.push('\n');
    }

    out
}
