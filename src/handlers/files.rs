//! Handler for the `files` command.

use super::cell;
use anyhow::{Context, Result};
use colored::Colorize;
use taskboard::engine::attachments::Preview;
use taskboard::engine::client::HttpClient;
use taskboard::engine::store::{FileFilter, FileStore};
use taskboard::engine::views::NOT_AVAILABLE;

/// Lists attachments, optionally for one task or one project.
///
/// # Errors
/// Returns error if the file API request fails.
pub async fn handle(client: &HttpClient, task: Option<&str>, project: Option<&str>, json: bool) -> Result<()> {
    let filter = FileFilter {
        task_id: task.map(str::to_string),
        projeto_id: project.filter(|p| !p.is_empty()).map(str::to_string),
    };
    let files = client
        .list_files(&filter)
        .await
        .context("Failed to load files")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    println!("{} Files:", "📎".cyan());
    if files.is_empty() {
        println!("   (No files found)");
        return Ok(());
    }

    for file in &files {
        let project = file
            .projeto
            .as_ref()
            .map_or(NOT_AVAILABLE, |p| p.title.as_str());
        let uploader = file
            .uploaded_by
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or(NOT_AVAILABLE);
        println!(
            "   {} {} {} {} {}",
            cell(&file.filename, 28).bold(),
            cell(project, 16),
            cell(&file.mimetype, 20).dimmed(),
            cell(uploader, 16),
            file.created_at.format("%Y-%m-%d").to_string().dimmed()
        );
        if Preview::for_attachment(file) == Preview::Unsupported {
            println!("     {} {}", "download:".dimmed(), file.url);
        }
    }
    Ok(())
}
