//! Parsers for vocabulary import sources.
//!
//! # Line format
//! ```text
//! # comment
//! dog : chien
//! the sun : le soleil
//! ```
//!
//! Each line splits on its first `:`. Blank and `#` lines are ignored.
//!
//! # Tabular format
//! CSV with a header row naming both columns; see [`FORM_A_ALIASES`] and
//! [`FORM_B_ALIASES`]. Header names are matched case-insensitively.

use crate::error::{ParseError, Result};
use crate::tabular::read_records;
use crate::types::RawPair;

/// Header names accepted for the first form.
pub const FORM_A_ALIASES: &[&str] = &["form_a", "a", "en", "english", "source", "term", "front"];

/// Header names accepted for the second form.
pub const FORM_B_ALIASES: &[&str] = &["form_b", "b", "fr", "french", "target", "translation", "back"];

/// Pairs read from a source, plus the lines that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSource {
    pub pairs: Vec<RawPair>,
    pub diagnostics: Vec<ParseError>,
}

/// Parse line-delimited `form_a : form_b` content.
pub fn parse_lines(content: &str) -> ParsedSource {
    let mut parsed = ParsedSource::default();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((left, right)) = trimmed.split_once(':') else {
            parsed.diagnostics.push(ParseError::MissingSeparator { line: line_number });
            continue;
        };

        match RawPair::new(left, right, line_number) {
            Some(pair) => parsed.pairs.push(pair),
            None => parsed.diagnostics.push(ParseError::EmptySide { line: line_number }),
        }
    }

    parsed
}

/// Parse CSV content with a header row.
///
/// Fails when the source cannot be tokenized or the header has no column for
/// one of the forms; rows with an empty form are reported and skipped.
pub fn parse_tabular(content: &str) -> Result<ParsedSource> {
    let records = read_records(content)?;
    let mut rows = records.into_iter();

    let Some(header) = rows.next() else {
        return Ok(ParsedSource::default());
    };

    let column_a = find_column(&header.fields, FORM_A_ALIASES)
        .ok_or(ParseError::MissingColumn { column: "form_a" })?;
    let column_b = find_column(&header.fields, FORM_B_ALIASES)
        .ok_or(ParseError::MissingColumn { column: "form_b" })?;

    let mut parsed = ParsedSource::default();
    for row in rows {
        let value = |column: usize| row.fields.get(column).map(String::as_str).unwrap_or("");
        let (form_a, form_b) = (value(column_a), value(column_b));

        if form_a.trim().is_empty() {
            parsed.diagnostics.push(ParseError::MissingField {
                line: row.line_number,
                column: "form_a",
            });
            continue;
        }

        match RawPair::new(form_a, form_b, row.line_number) {
            Some(pair) => parsed.pairs.push(pair),
            None => parsed.diagnostics.push(ParseError::MissingField {
                line: row.line_number,
                column: "form_b",
            }),
        }
    }

    Ok(parsed)
}

fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header.iter().position(|name| {
        let name = name.trim();
        aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias))
    })
}
