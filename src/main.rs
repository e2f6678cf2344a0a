//! gemini-catalog CLI binary entry point.

use clap::Parser;
use gemini_catalog::cli::{commands, Cli, Commands};
use gemini_catalog::config::CatalogConfig;
use gemini_catalog::settings::FileSettingsStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env();
    let store = match cli.settings_dir {
        Some(dir) => FileSettingsStore::new(dir),
        None => FileSettingsStore::new_default(),
    };

    let result = match &cli.command {
        Commands::Models(args) => {
            commands::handle_models(&args.key, args.json, &store, &config).await
        }
        Commands::Check(args) => commands::handle_check(&args.target, &store, &config).await,
        Commands::Select(args) => {
            commands::handle_select(&args.model, &args.key, &store, &config).await
        }
        Commands::Show => commands::handle_show(&store),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
