use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::model::board::Board;

/// Writes `board` as pretty JSON to `path`, or to stdout when `None`.
pub fn write_board(board: &Board, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(board)
        .with_context(|| format!("Failed to serialize board '{}'", board.title))?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote board");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write board to stdout")?;
        }
    }
    Ok(())
}
