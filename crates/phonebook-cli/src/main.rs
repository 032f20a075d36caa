//! Phonebook CLI
//!
//! Command-line interface for the phonebook - REST API server, TUI, and
//! headless contact commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use phonebook_core::Config;

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook - contacts over a REST API")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve,
    /// Start the TUI interface
    Tui,
    /// List all contacts
    #[command(alias = "ls")]
    List,
    /// Add a contact, or replace the number of an existing one
    Add {
        /// Contact name
        name: String,
        /// Phone number
        number: String,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact id
        id: String,
    },
    /// Show server status (contact count and server time)
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Serve => commands::serve::run(&config).await,
        Commands::Tui => tui::run(&config).await,
        Commands::List => commands::person::list(&config, &output).await,
        Commands::Add { name, number } => {
            commands::person::add(&config, name, number, &output).await
        }
        Commands::Delete { id } => commands::person::delete(&config, id, &output).await,
        Commands::Info => commands::person::info(&config, &output).await,
    }
}
