//! Handler for the `delete` command.

use super::{load_board, resolve_target};
use anyhow::{Context, Result};
use colored::Colorize;
use taskboard::engine::client::HttpClient;

/// Deletes a task.
///
/// # Errors
/// Returns error if the task is unknown or the store refuses.
pub async fn handle(client: &HttpClient, task_ref: &str) -> Result<()> {
    let mut board = load_board(client, None).await?;
    let task = resolve_target(&board, task_ref)?;

    board
        .remove(client, &task.id)
        .await
        .with_context(|| format!("Could not delete [{}]", task.id))?;

    println!("{} Deleted [{}] {}", "✓".green(), task.id.yellow(), task.title);
    Ok(())
}
