//! Remote store boundary.
//!
//! The task API owns persistence. These traits are the only way the engine
//! reaches it, so board and panel logic can run against a fake in tests.

#![allow(async_fn_in_trait)]

use super::error::ApiError;
use super::types::{Attachment, Comment, NewAttachment, ProjectRef, Task, TaskPayload, UploadedBlob};
use std::path::Path;

/// Narrows `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub projeto_id: Option<String>,
}

impl TaskFilter {
    /// Builds a filter from a CLI/select value. Empty means "all projects".
    #[must_use]
    pub fn project(projeto_id: Option<&str>) -> Self {
        Self {
            projeto_id: projeto_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    /// Query pairs for the request URL.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        self.projeto_id
            .iter()
            .map(|id| ("projetoId", id.clone()))
            .collect()
    }
}

/// Narrows `GET /files`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub task_id: Option<String>,
    pub projeto_id: Option<String>,
}

impl FileFilter {
    #[must_use]
    pub fn task(task_id: &str) -> Self {
        Self {
            task_id: Some(task_id.to_string()),
            projeto_id: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = &self.task_id {
            pairs.push(("taskId", id.clone()));
        }
        if let Some(id) = &self.projeto_id {
            pairs.push(("projetoId", id.clone()));
        }
        pairs
    }
}

pub trait TaskStore {
    /// `GET /tasks`. Order is the store's; callers do not re-sort.
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError>;

    /// `PUT /tasks/{id}` with the whole record. Any 2xx counts as accepted;
    /// the response body is not read.
    async fn update_task(&self, id: &str, payload: &TaskPayload) -> Result<(), ApiError>;

    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;
}

pub trait CommentStore {
    async fn list_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError>;

    /// Returns the full thread after the comment is stored.
    async fn add_comment(&self, task_id: &str, message: &str) -> Result<Vec<Comment>, ApiError>;
}

pub trait FileStore {
    async fn list_files(&self, filter: &FileFilter) -> Result<Vec<Attachment>, ApiError>;

    /// `POST /upload`: stores the blob, returns where it went.
    async fn upload_blob(&self, path: &Path, mimetype: &str) -> Result<UploadedBlob, ApiError>;

    /// `POST /files`: records metadata for an uploaded blob.
    async fn save_file(&self, file: &NewAttachment) -> Result<(), ApiError>;
}

pub trait ProjectStore {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, ApiError>;
}
