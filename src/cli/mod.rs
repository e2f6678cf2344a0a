//! CLI definitions for gemini-catalog.

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// Gemini model catalog CLI
#[derive(Parser, Debug)]
#[command(
    name = "gemini-catalog",
    version,
    about = "Discover, check, and select Gemini models"
)]
pub struct Cli {
    /// Directory holding settings.toml (defaults to ~/.gemini-catalog)
    #[arg(long, global = true)]
    pub settings_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List models available to the credential
    Models(ModelsArgs),
    /// Check connectivity to an API
    Check(CheckArgs),
    /// Choose the model used for generation
    Select(SelectArgs),
    /// Show persisted settings
    Show,
}

/// Credential override shared by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// API key (overrides saved settings and environment)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for `models`.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub target: CheckCommands,
}

/// Check subcommands.
#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Send a short prompt to a generation model
    Generation {
        #[command(flatten)]
        key: KeyArgs,
        /// Model to probe (defaults to the saved model)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Run text detection on a tiny image
    Vision {
        #[command(flatten)]
        key: KeyArgs,
    },
}

/// Arguments for `select`.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Model id, with or without the `models/` prefix
    pub model: String,

    #[command(flatten)]
    pub key: KeyArgs,
}
