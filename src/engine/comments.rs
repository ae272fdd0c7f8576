//! Comment thread for a single task.

use super::error::ApiError;
use super::store::CommentStore;
use super::types::Comment;
use tracing::warn;

#[derive(Debug, Default)]
pub struct CommentThread {
    task_id: String,
    comments: Vec<Comment>,
    error: Option<String>,
}

impl CommentThread {
    /// Starts from comments already embedded in the task record.
    #[must_use]
    pub fn new(task_id: &str, comments: Vec<Comment>) -> Self {
        Self {
            task_id: task_id.to_string(),
            comments,
            error: None,
        }
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refetches the thread.
    ///
    /// # Errors
    /// Returns the store error; the current thread is kept.
    pub async fn refresh<S: CommentStore>(&mut self, store: &S) -> Result<(), ApiError> {
        self.comments = store.list_comments(&self.task_id).await?;
        Ok(())
    }

    /// Posts a comment. On success the server's thread replaces ours.
    ///
    /// # Errors
    /// Blank messages fail locally without a request. Store errors are
    /// returned; the thread is left as it was. The message is kept in
    /// `error()` either way.
    pub async fn post<S: CommentStore>(&mut self, store: &S, message: &str) -> Result<(), ApiError> {
        let result = if message.trim().is_empty() {
            Err(ApiError::precondition("Comment cannot be empty."))
        } else if self.task_id.trim().is_empty() {
            Err(ApiError::precondition("No task selected."))
        } else {
            store.add_comment(&self.task_id, message).await
        };

        match result {
            Ok(comments) => {
                self.comments = comments;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(task = %self.task_id, error = %err, "comment not posted");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
