//! Handler for the `list` command.

use super::{cell, load_board, priority_badge, status_badge};
use anyhow::Result;
use colored::Colorize;
use taskboard::engine::client::HttpClient;
use taskboard::engine::views::{table_rows, StatusCounts};

/// Lists tasks as a table.
///
/// # Errors
/// Returns error if the task API request fails.
pub async fn handle(client: &HttpClient, project: Option<&str>, json: bool) -> Result<()> {
    let board = load_board(client, project).await?;
    let rows = table_rows(board.tasks());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} Tasks:", "📋".cyan());
    if rows.is_empty() {
        println!("   (No tasks found)");
        return Ok(());
    }

    println!(
        "   {} {} {} {} {} {}",
        cell("ID", 12).dimmed(),
        cell("Title", 32).dimmed(),
        cell("Project", 16).dimmed(),
        cell("Status", 12).dimmed(),
        cell("Priority", 8).dimmed(),
        "Assignee / Due".dimmed()
    );
    for row in &rows {
        println!(
            "   {} {} {} {}{} {}{} {}",
            cell(&row.id, 12).blue(),
            cell(&row.title, 32),
            cell(&row.project, 16),
            status_badge(row.status),
            pad(row.status_label, 12),
            priority_badge(row.priority),
            pad(row.priority_label, 8),
            format!("{} / {}", row.assignee, row.due).dimmed()
        );
    }

    let counts = StatusCounts::from_tasks(board.tasks());
    println!(
        "\n   {} total: {} pending, {} in progress, {} done",
        counts.total(),
        counts.pending,
        counts.in_progress,
        counts.done
    );
    Ok(())
}

fn pad(label: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(label.chars().count()))
}
