use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config;
use crate::convert;
use crate::deck::{self, client::DeckClient};
use crate::model::board::Board;
use crate::output;
use crate::trello;

#[derive(Debug, Parser)]
#[command(name = "trello-to-deck")]
#[command(version, about = "Convert Trello board exports for Nextcloud Deck")]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a Trello JSON export into a Deck board document
    Convert {
        /// Trello board export (JSON)
        export: PathBuf,
        /// Write the board here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a Trello JSON export and create the board on a Deck server
    Upload {
        /// Trello board export (JSON)
        export: PathBuf,
        /// Config file with the [deck] server section
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { export, output } => handle_convert(&export, output.as_deref()),
        Commands::Upload { export, config } => handle_upload(&export, config.as_deref()).await,
    }
}

fn load_board(export: &Path) -> Result<Board> {
    let export_data = trello::load_export(export)?;
    let board = convert::to_board(&export_data)
        .with_context(|| format!("Failed to convert {}", export.display()))?;
    Ok(board)
}

pub fn handle_convert(export: &Path, output: Option<&Path>) -> Result<()> {
    let board = load_board(export)?;
    output::write_board(&board, output)
}

pub async fn handle_upload(export: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config(config_path)?;
    let Some(deck_config) = config.deck else {
        anyhow::bail!(
            "No Deck server configured. Add a [deck] section with url, username and password to {}",
            config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(config::default_config_path)
                .display()
        );
    };

    let board = load_board(export)?;
    let client = DeckClient::new(&deck_config);
    let summary = deck::upload_board(&client, &board).await?;

    println!(
        "Created board '{}' (id {}) with {} stacks, {} cards, {} labels, {} comments",
        board.title, summary.board_id, summary.stacks, summary.cards, summary.labels, summary.comments
    );
    Ok(())
}
