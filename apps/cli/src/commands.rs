use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vocab_core::{Direction, ItemStatus};

#[derive(Parser)]
#[command(name = "vocab")]
#[command(author, version, about = "A spaced-repetition vocabulary trainer")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vocabulary file
    #[arg(long, global = true, env = "VOCAB_DATA")]
    pub data: Option<PathBuf>,

    /// Name of the first language
    #[arg(long, global = true, env = "VOCAB_LABEL_A", default_value = "English")]
    pub label_a: String,

    /// Name of the second language
    #[arg(long, global = true, env = "VOCAB_LABEL_B", default_value = "French")]
    pub label_b: String,

    /// Hour (0-23) at which a new study day starts
    #[arg(
        long,
        global = true,
        env = "VOCAB_RESET_HOUR",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub reset_hour: u32,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import `word : translation` lines from a text file
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Import pairs from a CSV file with a header row
    ImportCsv {
        /// File to import
        file: PathBuf,
    },

    /// Export every item with its progress as CSV
    ExportCsv {
        /// Destination file
        file: PathBuf,
    },

    /// Start an interactive review session
    #[command(visible_alias = "q")]
    Quiz {
        /// Only review items due today
        #[arg(long)]
        due_only: bool,

        /// Only review items answered wrong (status learning)
        #[arg(long)]
        only_wrong: bool,

        /// Review a single item by id, ignoring other filters
        #[arg(long)]
        item: Option<u64>,

        /// Always quiz in one direction (a_to_b, b_to_a, en2fr, fr2en)
        #[arg(short, long)]
        direction: Option<Direction>,
    },

    /// Show item counts by status
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List items with their progress
    #[command(visible_alias = "ls")]
    List {
        /// Only items whose forms contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only items with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark every item as new again
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    New,
    Learning,
    Validated,
}

impl From<StatusArg> for ItemStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::New => ItemStatus::New,
            StatusArg::Learning => ItemStatus::Learning,
            StatusArg::Validated => ItemStatus::Validated,
        }
    }
}
