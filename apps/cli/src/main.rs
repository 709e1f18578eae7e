mod commands;
mod config;
mod handlers;
mod logging;

use anyhow::Result;
use clap::Parser;
use vocab_core::SessionOptions;

use commands::{Cli, Commands};
use config::Settings;
use handlers::{CommandContext, ListParams};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = Settings::from_cli(&cli);
    tracing::debug!(path = %settings.data_path.display(), "using vocabulary file");
    let ctx = CommandContext::new(settings);

    match cli.command {
        Commands::Import { file } => handlers::handle_import(&ctx, &file),
        Commands::ImportCsv { file } => handlers::handle_import_csv(&ctx, &file),
        Commands::ExportCsv { file } => handlers::handle_export_csv(&ctx, &file),
        Commands::Quiz {
            due_only,
            only_wrong,
            item,
            direction,
        } => handlers::handle_quiz(
            &ctx,
            SessionOptions {
                due_only,
                only_wrong,
                item_id: item,
                direction,
            },
        ),
        Commands::Stats { json } => handlers::handle_stats(&ctx, json),
        Commands::List {
            search,
            status,
            json,
        } => handlers::handle_list(
            &ctx,
            ListParams {
                search,
                status,
                json,
            },
        ),
        Commands::Reset => handlers::handle_reset(&ctx),
    }
}
