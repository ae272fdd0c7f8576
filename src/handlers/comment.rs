//! Handler for the `comment` command.

use super::{load_board, resolve_target};
use anyhow::{bail, Result};
use colored::Colorize;
use taskboard::engine::client::HttpClient;
use taskboard::engine::comments::CommentThread;

/// Posts a comment on a task.
///
/// # Errors
/// Returns error if the message is blank, the task is unknown, or the
/// store rejects the comment.
pub async fn handle(client: &HttpClient, task_ref: &str, message: &str) -> Result<()> {
    let board = load_board(client, None).await?;
    let task = resolve_target(&board, task_ref)?;

    let mut thread = CommentThread::new(&task.id, task.comments);
    if thread.post(client, message).await.is_err() {
        let reason = thread.error().unwrap_or_default();
        bail!("Comment not posted on [{}]: {reason}", task.id);
    }

    println!(
        "{} Commented on [{}] {} ({} comments)",
        "✓".green(),
        task.id.yellow(),
        task.title,
        thread.comments().len()
    );
    Ok(())
}
