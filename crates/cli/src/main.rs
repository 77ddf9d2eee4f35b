//! Atrium CLI - Command-line interface for Atrium
//!
//! Usage:
//!   atrium grants stats --role <role>            - Show grant coverage
//!   atrium grants toggle <module> <action> --role <role>
//!   atrium grants import <file> --role <role>    - Merge a grant table file
//!   atrium preview <menu.json> --role <role>     - Preview the filtered menu
//!   atrium seal <text> --key <hex>               - Seal a payload
//!   atrium open <envelope> --key <hex>           - Open a sealed payload

use clap::{Parser, Subcommand};
use cli::commands::{GrantsCommand, OpenCommand, PreviewCommand, SealCommand};

#[derive(Parser)]
#[command(name = "atrium")]
#[command(about = "Atrium - Role-based access control toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the permission grant table
    Grants(GrantsCommand),
    /// Preview the menu a role would see
    Preview(PreviewCommand),
    /// Seal a payload under the pre-shared key
    Seal(SealCommand),
    /// Open a sealed payload
    Open(OpenCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grants(cmd) => cmd.run(),
        Commands::Preview(cmd) => cmd.run(),
        Commands::Seal(cmd) => cmd.run(),
        Commands::Open(cmd) => cmd.run(),
    }
}
