//! Handler for the `show` command.

use super::{load_board, priority_badge, resolve_task, status_badge};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use taskboard::engine::attachments::{AttachmentPanel, Preview};
use taskboard::engine::client::HttpClient;
use taskboard::engine::comments::CommentThread;
use taskboard::engine::types::{Attachment, Comment, Task};
use taskboard::engine::views::{TableRow, NOT_AVAILABLE};

#[derive(Serialize)]
struct DetailView<'a> {
    task: &'a Task,
    files: &'a [Attachment],
    comments: &'a [Comment],
}

/// Shows a task with its attachments and comment thread.
///
/// # Errors
/// Returns error if the task cannot be found.
pub async fn handle(client: &HttpClient, task_ref: &str, json: bool) -> Result<()> {
    let board = load_board(client, None).await?;
    let task = resolve_task(&board, task_ref)?;

    let mut panel = AttachmentPanel::new(&task.id);
    if let Err(err) = panel.refresh(client).await {
        tracing::warn!(task = %task.id, error = %err, "could not load attachments");
    }

    let mut thread = CommentThread::new(&task.id, task.comments.clone());
    if let Err(err) = thread.refresh(client).await {
        tracing::warn!(task = %task.id, error = %err, "using comments embedded in the task");
    }

    if json {
        let view = DetailView {
            task: &task,
            files: panel.files(),
            comments: thread.comments(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_task(&task);
    println!();
    print_files(panel.files());
    println!();
    print_comments(thread.comments());
    Ok(())
}

fn print_task(task: &Task) {
    let row = TableRow::from_task(task);
    println!("{} [{}]", task.title.bold(), task.id.yellow());
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("   {description}");
    }
    println!("   Status:   {}", status_badge(task.status));
    println!("   Priority: {}", priority_badge(task.priority));
    println!("   Project:  {}", row.project);
    println!("   Assignee: {}", row.assignee);
    println!("   Due:      {}", row.due);
}

fn print_files(files: &[Attachment]) {
    println!("{}", format!("Files ({})", files.len()).dimmed().underline());
    if files.is_empty() {
        println!("   (No files)");
        return;
    }
    for file in files {
        let preview = Preview::for_attachment(file);
        println!(
            "   {}  {}  {}",
            file.filename.bold(),
            format!("[{}]", preview.label()).dimmed(),
            file.url.blue()
        );
    }
}

fn print_comments(comments: &[Comment]) {
    println!("{}", format!("Comments ({})", comments.len()).dimmed().underline());
    if comments.is_empty() {
        println!("   (No comments)");
        return;
    }
    for comment in comments {
        let author = comment
            .author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or(NOT_AVAILABLE);
        println!(
            "   {}  {}",
            author.cyan(),
            comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
        println!("     {}", comment.message);
    }
}
