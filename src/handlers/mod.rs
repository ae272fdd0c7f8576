//! One module per CLI command.

pub mod board;
pub mod comment;
pub mod delete;
pub mod files;
pub mod list;
pub mod move_task;
pub mod projects;
pub mod show;
pub mod upload;

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use taskboard::engine::board::TaskBoard;
use taskboard::engine::client::HttpClient;
use taskboard::engine::resolver::TaskResolver;
use taskboard::engine::store::TaskFilter;
use taskboard::engine::types::{Priority, Task, TaskStatus};
use taskboard::engine::views::{priority_style, status_style};

/// Fetches the task collection, optionally narrowed to one project.
///
/// # Errors
/// Returns error if the task API cannot be reached or rejects the request.
pub async fn load_board(client: &HttpClient, project: Option<&str>) -> Result<TaskBoard> {
    let mut board = TaskBoard::default();
    board
        .load(client, &TaskFilter::project(project))
        .await
        .with_context(|| format!("Failed to load tasks from {}", client.base_url()))?;
    Ok(board)
}

/// Resolves a task reference, fuzzy matches included. For read commands.
///
/// # Errors
/// Returns error if nothing matches.
pub fn resolve_task(board: &TaskBoard, task_ref: &str) -> Result<Task> {
    Ok(TaskResolver::new(board.tasks()).resolve(task_ref)?.task.clone())
}

/// Resolves a task reference by exact id or title only. Commands that
/// change a task go through here.
///
/// # Errors
/// Returns error if the reference is not exact.
pub fn resolve_target(board: &TaskBoard, task_ref: &str) -> Result<Task> {
    Ok(TaskResolver::new(board.tasks()).resolve_exact(task_ref)?.clone())
}

pub fn status_badge(status: TaskStatus) -> ColoredString {
    let style = status_style(status);
    style.label.color(style.color)
}

pub fn priority_badge(priority: Priority) -> ColoredString {
    let style = priority_style(priority);
    style.label.color(style.color)
}

pub fn status_icon(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Pending => "○".dimmed(),
        TaskStatus::InProgress => "→".yellow(),
        TaskStatus::Done => "✓".green(),
    }
}

/// Truncates to `width` characters and pads on the right.
pub fn cell(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{text:<width$}")
    }
}
