// CLI module: server, migrations and the board client

pub mod board;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::client::CategoryFilter;
use crate::config::BootstrapSettings;

/// Lost & Found backend and board client
#[derive(Parser, Debug)]
#[command(name = "lostfound")]
#[command(about = "Lost & Found bulletin board backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Create the items table and indexes, then exit
    Migrate,

    /// Fetch items from a running server and print the filtered board as HTML
    Board {
        /// Base URL of the server
        #[arg(long, default_value = "http://localhost:5000")]
        api_url: String,

        /// Category to show, or `all`
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Case-insensitive text matched against title and description
        #[arg(long, default_value = "")]
        search: String,
    },
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
pub async fn execute_command(
    cli: Cli,
    settings: &BootstrapSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(settings).await?,
        Commands::Board {
            api_url,
            category,
            search,
        } => {
            let html = board::run_board(&api_url, category, &search).await?;
            println!("{}", html);
        }
    }

    Ok(())
}
