mod export;
mod import;
mod list;
mod quiz;
mod reset;
mod stats;

pub use export::handle_export_csv;
pub use import::{handle_import, handle_import_csv};
pub use list::{handle_list, ListParams};
pub use quiz::handle_quiz;
pub use reset::handle_reset;
pub use stats::handle_stats;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use vocab_core::dates::adjusted_today;
use vocab_core::{FormLabels, Item, ItemStore, JsonFileStore};

use crate::config::Settings;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub store: JsonFileStore,
    pub labels: FormLabels,
    pub today: NaiveDate,
}

impl CommandContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            store: JsonFileStore::new(settings.data_path),
            labels: settings.labels,
            today: adjusted_today(settings.reset_hour),
        }
    }

    pub fn load_items(&self) -> Result<Vec<Item>> {
        self.store
            .load(self.today)
            .with_context(|| format!("Failed to load {}", self.store.path().display()))
    }

    pub fn save_items(&self, items: &[Item]) -> Result<()> {
        self.store
            .save(items)
            .with_context(|| format!("Failed to save {}", self.store.path().display()))
    }
}
