//! Handler for the `upload` command.

use super::{load_board, resolve_target};
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;
use taskboard::engine::attachments::{AttachmentPanel, UploadRequest};
use taskboard::engine::client::HttpClient;

/// Uploads a file and attaches it to a task (and the task's project).
///
/// # Errors
/// Returns error if the file is missing or either upload step fails.
pub async fn handle(client: &HttpClient, task_ref: &str, path: PathBuf) -> Result<()> {
    let board = load_board(client, None).await?;
    let task = resolve_target(&board, task_ref)?;

    let request = UploadRequest {
        path: Some(path),
        task_id: task.id.clone(),
        projeto_id: task.projeto_id.clone(),
    };
    let mut panel = AttachmentPanel::new(&task.id);
    if panel.upload(client, &request).await.is_err() {
        let reason = panel.error().unwrap_or_default();
        bail!("Upload to [{}] failed: {reason}", task.id);
    }

    println!(
        "{} Attached to [{}] {} ({} files)",
        "✓".green(),
        task.id.yellow(),
        task.title,
        panel.files().len()
    );
    Ok(())
}
