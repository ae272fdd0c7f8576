//! Handler for the `board` command.

use super::{load_board, priority_badge, status_badge, status_icon};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use taskboard::engine::client::HttpClient;
use taskboard::engine::views::{kanban_columns, status_style, KanbanColumn};

#[derive(Serialize)]
struct ColumnView<'a> {
    status: String,
    label: &'static str,
    count: usize,
    tasks: &'a [&'a taskboard::engine::types::Task],
}

/// Shows tasks partitioned into one column per status.
///
/// # Errors
/// Returns error if the task API request fails.
pub async fn handle(client: &HttpClient, project: Option<&str>, json: bool) -> Result<()> {
    let board = load_board(client, project).await?;
    let columns = kanban_columns(board.tasks());

    if json {
        return print_json(&columns);
    }

    print_human(&columns);
    Ok(())
}

fn print_json(columns: &[KanbanColumn<'_>]) -> Result<()> {
    let views: Vec<_> = columns
        .iter()
        .map(|c| ColumnView {
            status: c.status.to_string(),
            label: status_style(c.status).label,
            count: c.tasks.len(),
            tasks: &c.tasks,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

fn print_human(columns: &[KanbanColumn<'_>]) {
    println!("{} Board", "🗂".cyan());

    for column in columns {
        println!(
            "\n   {} ({})",
            status_badge(column.status).bold(),
            column.tasks.len()
        );
        if column.tasks.is_empty() {
            println!("     {}", "(empty)".dimmed());
            continue;
        }
        for task in &column.tasks {
            println!(
                "     {} [{}] {} {}",
                status_icon(task.status),
                task.id.yellow(),
                task.title,
                priority_badge(task.priority)
            );
        }
    }
}
