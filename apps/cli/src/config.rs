use std::path::PathBuf;

use vocab_core::FormLabels;

use crate::commands::Cli;

const APP_DIR: &str = "vocab-trainer";
const DATA_FILE: &str = "words.json";

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub labels: FormLabels,
    pub reset_hour: u32,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_path: cli.data.clone().unwrap_or_else(default_data_path),
            labels: FormLabels {
                form_a: cli.label_a.clone(),
                form_b: cli.label_b.clone(),
            },
            reset_hour: cli.reset_hour,
        }
    }
}

/// `<local data dir>/vocab-trainer/words.json`, or `words.json` in the
/// working directory on platforms without one.
pub fn default_data_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(DATA_FILE))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE))
}
