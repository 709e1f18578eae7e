//! Core vocabulary trainer library shared by the CLI and web applications.
//!
//! Provides:
//! - Line and tabular parsers for vocabulary sources
//! - Answer normalization and typo-tolerant matching (Levenshtein distance)
//! - Simplified SM-2 scheduling for pass/fail gradings
//! - The review session engine
//! - JSON persistence of the item collection and CSV export

pub mod algorithm;
pub mod collection;
pub mod dates;
pub mod error;
pub mod export;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod session;
pub mod store;
pub mod tabular;
pub mod types;

pub use algorithm::{grade, SpacedRepetitionAlgorithm, Sm2};
pub use collection::{
    due_count, find_item, import_source, next_id, reset_progress, search, status_counts,
    ImportReport,
};
pub use error::{ParseError, Result, SessionError, StoreError};
pub use export::to_csv;
pub use matching::{is_correct, levenshtein_distance, match_answer, MatchResult};
pub use normalize::normalize;
pub use parser::{parse_lines, parse_tabular, ParsedSource};
pub use session::{
    Control, Prompt, Response, ReviewSession, SessionOptions, SessionState, SessionSummary, Step,
    Verdict,
};
pub use store::{ItemStore, JsonFileStore, MemoryStore};
pub use types::{Direction, FormLabels, Item, ItemStatus, RawPair, StatusCounts};
