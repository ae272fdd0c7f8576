//! HTTP client for the task API.
//!
//! Wraps a `reqwest::Client` with the configured base URL and bearer token.
//! Non-2xx responses become `ApiError::Rejected`, carrying the body's
//! `message` field when the server sent one. No retries.

use super::config::Config;
use super::error::ApiError;
use super::store::{CommentStore, FileFilter, FileStore, ProjectStore, TaskFilter, TaskStore};
use super::types::{Attachment, Comment, NewAttachment, ProjectRef, Task, TaskPayload, UploadedBlob};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ProjectList {
    projetos: Vec<ProjectRef>,
}

impl HttpClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// underlying client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::precondition("token contains invalid header characters"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ApiError::Transport {
            endpoint: config.base_url.clone(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and maps transport failures and non-2xx statuses.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|source| {
            warn!(endpoint, error = %source, "request failed");
            ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(ApiError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T, ApiError> {
        response.json().await.map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let response = self
            .send(self.client.get(self.url(path)).query(query), path)
            .await?;
        Self::decode(response, path).await
    }
}

impl TaskStore for HttpClient {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.get_json("/tasks", &filter.query()).await
    }

    async fn update_task(&self, id: &str, payload: &TaskPayload) -> Result<(), ApiError> {
        let path = format!("/tasks/{id}");
        self.send(self.client.put(self.url(&path)).json(payload), &path).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/tasks/{id}");
        self.send(self.client.delete(self.url(&path)), &path).await?;
        Ok(())
    }
}

impl CommentStore for HttpClient {
    async fn list_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&format!("/tasks/{task_id}/comments"), &[]).await
    }

    async fn add_comment(&self, task_id: &str, message: &str) -> Result<Vec<Comment>, ApiError> {
        let path = format!("/tasks/{task_id}/comments");
        let body = serde_json::json!({ "message": message });
        let response = self
            .send(self.client.post(self.url(&path)).json(&body), &path)
            .await?;
        Self::decode(response, &path).await
    }
}

impl FileStore for HttpClient {
    async fn list_files(&self, filter: &FileFilter) -> Result<Vec<Attachment>, ApiError> {
        self.get_json("/files", &filter.query()).await
    }

    async fn upload_blob(&self, path: &Path, mimetype: &str) -> Result<UploadedBlob, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mimetype)
            .map_err(|_| ApiError::precondition(format!("invalid MIME type '{mimetype}'")))?;
        let form = Form::new().part("file", part);

        let response = self
            .send(self.client.post(self.url("/upload")).multipart(form), "/upload")
            .await?;
        Self::decode(response, "/upload").await
    }

    async fn save_file(&self, file: &NewAttachment) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/files")).json(file), "/files")
            .await?;
        Ok(())
    }
}

impl ProjectStore for HttpClient {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, ApiError> {
        let list: ProjectList = self.get_json("/crud/projetos", &[]).await?;
        Ok(list.projetos)
    }
}
