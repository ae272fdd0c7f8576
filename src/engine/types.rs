//! Core types for the task dashboard.
//!
//! Field names follow the remote API's camelCase JSON. `TaskStatus` is the one
//! canonical status enum; labels and colors live in `views`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow state of a task.
///
/// The store speaks `PENDENTE / EM_ANDAMENTO / CONCLUIDA`; older boards used
/// `TODO / IN_PROGRESS / DONE`. Both decode to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "PENDENTE", alias = "TODO", alias = "PENDING")]
    Pending,
    #[serde(rename = "EM_ANDAMENTO", alias = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "CONCLUIDA", alias = "DONE")]
    Done,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// The value sent to the store.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::InProgress => "EM_ANDAMENTO",
            Self::Done => "CONCLUIDA",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected pending, in-progress or done)")]
pub struct ParseStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "PENDENTE" | "PENDING" | "TODO" => Ok(Self::Pending),
            "EM_ANDAMENTO" | "IN_PROGRESS" | "DOING" => Ok(Self::InProgress),
            "CONCLUIDA" | "DONE" => Ok(Self::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Small ordinal priority. Higher is more urgent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

/// Display band for a priority value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityBand {
    Low,
    Normal,
    High,
}

impl Priority {
    #[must_use]
    pub fn band(self) -> PriorityBand {
        match self.0 {
            0 => PriorityBand::Low,
            1 => PriorityBand::Normal,
            _ => PriorityBand::High,
        }
    }
}

/// Embedded user reference (`assignedTo`, `author`, `uploadedBy`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A project (`Projeto`) as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub title: String,
}

/// Embedded task reference on an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<UserRef>,
    pub created_at: DateTime<Utc>,
}

/// A task as mirrored from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub projeto_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projeto: Option<ProjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Whole-record body for `PUT /tasks/{id}`.
///
/// Every field is always serialized, `null` included: the store replaces the
/// record, so an omitted field would be cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to_id: Option<String>,
    pub author_id: Option<String>,
    pub projeto_id: Option<String>,
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            assigned_to_id: task.assigned_to_id.clone(),
            author_id: task.author_id.clone(),
            projeto_id: task.projeto_id.clone(),
        }
    }
}

/// Attachment metadata. The blob itself lives behind `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub mimetype: String,
    pub uploaded_by_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub projeto_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projeto: Option<ProjectRef>,
}

/// Result of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedBlob {
    pub url: String,
    pub filename: String,
    pub mimetype: String,
}

/// Body for `POST /files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttachment {
    pub url: String,
    pub filename: String,
    pub mimetype: String,
    pub task_id: Option<String>,
    pub projeto_id: Option<String>,
}
