use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use vocab_core::to_csv;

use super::CommandContext;

pub fn handle_export_csv(ctx: &CommandContext, file: &Path) -> Result<()> {
    let items = ctx.load_items()?;

    std::fs::write(file, to_csv(&items))
        .with_context(|| format!("Failed to write {}", file.display()))?;

    println!(
        "{} {} item(s) to {}",
        "Exported".green(),
        items.len(),
        file.display()
    );
    Ok(())
}
