use anyhow::Result;
use colored::Colorize;
use vocab_core::reset_progress;

use super::CommandContext;

pub fn handle_reset(ctx: &CommandContext) -> Result<()> {
    let mut items = ctx.load_items()?;
    reset_progress(&mut items);
    ctx.save_items(&items)?;

    tracing::info!(count = items.len(), "progress reset");
    println!("{} {} item(s) to new", "Reset".green(), items.len());
    Ok(())
}
