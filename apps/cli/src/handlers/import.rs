use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use vocab_core::{import_source, parse_lines, parse_tabular, ImportReport, ParsedSource};

use super::CommandContext;

pub fn handle_import(ctx: &CommandContext, file: &Path) -> Result<()> {
    let content = read_source(file)?;
    import(ctx, parse_lines(&content))
}

pub fn handle_import_csv(ctx: &CommandContext, file: &Path) -> Result<()> {
    let content = read_source(file)?;
    let source = parse_tabular(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    import(ctx, source)
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn import(ctx: &CommandContext, source: ParsedSource) -> Result<()> {
    let mut items = ctx.load_items()?;
    let report = import_source(&mut items, source, ctx.today);

    if report.added > 0 {
        ctx.save_items(&items)?;
    }

    print_report(&report, items.len());
    Ok(())
}

fn print_report(report: &ImportReport, total: usize) {
    for diagnostic in &report.diagnostics {
        eprintln!("{} {}", "warning:".yellow(), diagnostic);
    }

    println!(
        "{} {} new, {} duplicate(s) skipped, {} total",
        "Imported".green(),
        report.added,
        report.duplicates,
        total
    );
}
