use anyhow::Result;
use colored::Colorize;
use vocab_core::{search, Item, ItemStatus};

use super::CommandContext;
use crate::commands::StatusArg;

/// Parameters for list operation
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<StatusArg>,
    pub json: bool,
}

pub fn handle_list(ctx: &CommandContext, params: ListParams) -> Result<()> {
    let items = ctx.load_items()?;
    let status = params.status.map(ItemStatus::from);
    let found = search(&items, params.search.as_deref().unwrap_or(""), status);

    if params.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for item in found {
        print_item(item);
    }
    Ok(())
}

fn print_item(item: &Item) {
    let status = match item.status {
        ItemStatus::New => item.status.as_str().normal(),
        ItemStatus::Learning => item.status.as_str().yellow(),
        ItemStatus::Validated => item.status.as_str().green(),
    };

    println!(
        "{:>4}  {} : {}  [{}] ef={:.2} interval={} reps={} due={}",
        item.id,
        item.form_a,
        item.form_b,
        status,
        item.ease_factor,
        item.interval,
        item.repetitions,
        item.due_date.format("%Y-%m-%d"),
    );
}
