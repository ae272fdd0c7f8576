//! Handler for the `move` command.

use super::{load_board, resolve_target, status_badge};
use anyhow::{bail, Result};
use colored::Colorize;
use taskboard::engine::board::TransitionOutcome;
use taskboard::engine::client::HttpClient;
use taskboard::engine::types::TaskStatus;

/// Moves a task to `status`, rolling back if the store refuses.
///
/// # Errors
/// Returns error if the task cannot be found or the store rejects the change.
pub async fn handle(client: &HttpClient, task_ref: &str, status: TaskStatus) -> Result<()> {
    let mut board = load_board(client, None).await?;
    let task = resolve_target(&board, task_ref)?;

    match board.transition(client, &task.id, status).await {
        TransitionOutcome::Unchanged => {
            println!(
                "{} [{}] is already {}",
                "•".dimmed(),
                task.id.yellow(),
                status_badge(status)
            );
        }
        TransitionOutcome::Applied => {
            println!(
                "{} Moved [{}] {}: {} → {}",
                "✓".green(),
                task.id.yellow(),
                task.title,
                status_badge(task.status),
                status_badge(status)
            );
        }
        TransitionOutcome::RolledBack { restored, message } => {
            bail!(
                "Could not move [{}] to {}: {message} (still {})",
                task.id,
                status,
                restored
            );
        }
        TransitionOutcome::Superseded => {
            println!("{} [{}] was changed again before this move settled", "!".yellow(), task.id);
        }
    }
    Ok(())
}
