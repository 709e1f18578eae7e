use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use vocab_core::{due_count, status_counts};

use super::CommandContext;

pub fn handle_stats(ctx: &CommandContext, json: bool) -> Result<()> {
    let items = ctx.load_items()?;
    let counts = status_counts(&items);
    let due = due_count(&items, ctx.today);

    if json {
        let body = json!({
            "new": counts.new,
            "learning": counts.learning,
            "validated": counts.validated,
            "total": counts.total,
            "due": due,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", format!("{} / {}", ctx.labels.form_a, ctx.labels.form_b).bold());
    println!("  {:<10} {}", "new", counts.new);
    println!("  {:<10} {}", "learning", counts.learning.to_string().yellow());
    println!("  {:<10} {}", "validated", counts.validated.to_string().green());
    println!("  {:<10} {}", "total", counts.total);
    println!("  {:<10} {}", "due", due);
    Ok(())
}
