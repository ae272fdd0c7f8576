//! Handler for the `projects` command.

use anyhow::{Context, Result};
use colored::Colorize;
use taskboard::engine::client::HttpClient;
use taskboard::engine::store::ProjectStore;

/// Lists projects usable as `--project` filters.
///
/// # Errors
/// Returns error if the project API request fails.
pub async fn handle(client: &HttpClient, json: bool) -> Result<()> {
    let projects = client
        .list_projects()
        .await
        .context("Failed to load projects")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    println!("{} Projects:", "📁".cyan());
    if projects.is_empty() {
        println!("   (No projects)");
    }
    for project in projects {
        println!("   [{}] {}", project.id.blue(), project.title);
    }
    Ok(())
}
