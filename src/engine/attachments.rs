//! Attachments: preview classification and the two-step upload flow.

use super::error::ApiError;
use super::store::{FileFilter, FileStore};
use super::types::{Attachment, NewAttachment};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How an attachment can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Image,
    Video,
    Pdf,
    /// Download only.
    Unsupported,
}

impl Preview {
    #[must_use]
    pub fn for_mime(mimetype: &str) -> Self {
        let mime = mimetype.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime == "application/pdf" {
            Self::Pdf
        } else {
            Self::Unsupported
        }
    }

    #[must_use]
    pub fn for_attachment(file: &Attachment) -> Self {
        Self::for_mime(&file.mimetype)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Unsupported => "download only",
        }
    }
}

/// Best-effort MIME type from a file extension.
#[must_use]
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("pdf") => "application/pdf",
        Some("txt" | "md") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// A file to attach to a task.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub path: Option<PathBuf>,
    pub task_id: String,
    pub projeto_id: Option<String>,
}

/// Attachments of one task plus the last upload error.
#[derive(Debug, Default)]
pub struct AttachmentPanel {
    task_id: String,
    files: Vec<Attachment>,
    error: Option<String>,
}

impl AttachmentPanel {
    #[must_use]
    pub fn new(task_id: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refetches the task's attachments.
    ///
    /// # Errors
    /// Returns the store error; the current list is kept.
    pub async fn refresh<S: FileStore>(&mut self, store: &S) -> Result<(), ApiError> {
        let files = store.list_files(&FileFilter::task(&self.task_id)).await?;
        self.files = files;
        Ok(())
    }

    /// Uploads the blob, records its metadata, then refreshes the list.
    ///
    /// # Errors
    /// Returns a precondition error before any request if no file is
    /// selected, the file is missing, or the task id is empty. Store errors
    /// from either step are returned as-is. The message is kept in
    /// `error()` in every case.
    pub async fn upload<S: FileStore>(&mut self, store: &S, request: &UploadRequest) -> Result<(), ApiError> {
        let result = self.try_upload(store, request).await;
        match &result {
            Ok(()) => self.error = None,
            Err(err) => {
                warn!(task = %request.task_id, error = %err, "upload failed");
                self.error = Some(err.user_message());
            }
        }
        result
    }

    async fn try_upload<S: FileStore>(&mut self, store: &S, request: &UploadRequest) -> Result<(), ApiError> {
        let path = check_upload(request).await?;
        let mimetype = guess_mime(&path);

        let blob = store.upload_blob(&path, mimetype).await?;
        info!(task = %request.task_id, filename = %blob.filename, "blob uploaded");

        let metadata = NewAttachment {
            url: blob.url,
            filename: blob.filename,
            mimetype: blob.mimetype,
            task_id: Some(request.task_id.clone()),
            projeto_id: request.projeto_id.clone(),
        };
        store.save_file(&metadata).await?;

        self.refresh(store).await
    }
}

async fn check_upload(request: &UploadRequest) -> Result<PathBuf, ApiError> {
    if request.task_id.trim().is_empty() {
        return Err(ApiError::precondition("No task selected."));
    }
    let Some(path) = &request.path else {
        return Err(ApiError::precondition("No file selected."));
    };
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(path.clone()),
        Ok(_) => Err(ApiError::precondition(format!("{} is not a file.", path.display()))),
        Err(source) => Err(ApiError::Io {
            path: path.clone(),
            source,
        }),
    }
}
