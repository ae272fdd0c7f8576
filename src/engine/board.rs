//! Optimistic Update Controller.
//!
//! `TaskBoard` owns the in-memory task collection that both the table and the
//! kanban views read. A status change is written locally first, then sent to
//! the store; a rejected change is rolled back.
//!
//! Each task carries a sequence ledger. Every `begin` takes the next number
//! for that task, and only the latest number may roll local state back. When
//! it does, the task returns to the last status the server acknowledged, so
//! a late response from an older request can never leave the board showing
//! something the store never accepted.

use super::error::ApiError;
use super::store::{TaskFilter, TaskStore};
use super::transition::plan_transition;
use super::types::{Task, TaskPayload, TaskStatus};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// What happened to a requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Unknown task or same status. Nothing was sent.
    Unchanged,
    /// The store accepted the change.
    Applied,
    /// The store refused; local state was restored.
    RolledBack { restored: TaskStatus, message: String },
    /// A newer change for the same task was started before this one settled.
    Superseded,
}

/// A change that has been applied locally and awaits the store's answer.
#[derive(Debug, Clone)]
#[must_use = "a pending transition must be settled"]
pub struct PendingTransition {
    task_id: String,
    seq: u64,
    payload: TaskPayload,
}

impl PendingTransition {
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    #[must_use]
    pub fn payload(&self) -> &TaskPayload {
        &self.payload
    }

    #[must_use]
    pub fn target(&self) -> TaskStatus {
        self.payload.status
    }
}

#[derive(Debug, Clone)]
struct Ledger {
    latest: u64,
    latest_settled: bool,
    confirmed: TaskStatus,
    confirmed_seq: u64,
}

#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    ledgers: HashMap<String, Ledger>,
    error: Option<String>,
}

impl TaskBoard {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ledgers: HashMap::new(),
            error: None,
        }
    }

    /// Tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The message currently shown to the user, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replaces the collection with a fresh fetch.
    ///
    /// Sequence ledgers are dropped; answers to requests sent before the
    /// reload are treated as superseded.
    ///
    /// # Errors
    /// Returns the store error. Its message is also kept as the board error.
    pub async fn load<S: TaskStore>(&mut self, store: &S, filter: &TaskFilter) -> Result<(), ApiError> {
        match store.list_tasks(filter).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), project = ?filter.projeto_id, "loaded tasks");
                self.tasks = tasks;
                self.ledgers.clear();
                self.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load tasks");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Applies `target` locally and returns the request to send.
    ///
    /// Returns `None`, touching nothing, if the task is unknown or already
    /// has `target`.
    pub fn begin(&mut self, task_id: &str, target: TaskStatus) -> Option<PendingTransition> {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        let payload = plan_transition(task, target)?;

        let ledger = self
            .ledgers
            .entry(task.id.clone())
            .or_insert_with(|| Ledger {
                latest: 0,
                latest_settled: true,
                confirmed: task.status,
                confirmed_seq: 0,
            });
        ledger.latest += 1;
        ledger.latest_settled = false;

        info!(task = task_id, from = %task.status, to = %target, seq = ledger.latest, "optimistic status change");
        task.status = target;

        Some(PendingTransition {
            task_id: task.id.clone(),
            seq: ledger.latest,
            payload,
        })
    }

    /// Folds the store's answer for `pending` back into local state.
    pub fn settle(&mut self, pending: PendingTransition, result: Result<(), ApiError>) -> TransitionOutcome {
        let Some(ledger) = self.ledgers.get_mut(&pending.task_id) else {
            debug!(task = %pending.task_id, "response arrived after reload, ignoring");
            return TransitionOutcome::Superseded;
        };
        let is_latest = pending.seq == ledger.latest;

        match result {
            Ok(()) => {
                if pending.seq > ledger.confirmed_seq {
                    ledger.confirmed = pending.target();
                    ledger.confirmed_seq = pending.seq;
                }
                if is_latest {
                    ledger.latest_settled = true;
                    self.error = None;
                    return TransitionOutcome::Applied;
                }
                if ledger.latest_settled && ledger.confirmed_seq == pending.seq {
                    // The newer change already failed and reverted to an
                    // older confirmation; this one is now the truth.
                    let confirmed = ledger.confirmed;
                    Self::set_status(&mut self.tasks, &pending.task_id, confirmed);
                }
                TransitionOutcome::Superseded
            }
            Err(err) => {
                if !is_latest {
                    debug!(task = %pending.task_id, seq = pending.seq, error = %err, "stale failure ignored");
                    return TransitionOutcome::Superseded;
                }
                ledger.latest_settled = true;
                let restored = ledger.confirmed;
                let message = err.user_message();
                warn!(task = %pending.task_id, restored = %restored, error = %err, "status change rejected, rolling back");
                Self::set_status(&mut self.tasks, &pending.task_id, restored);
                self.error = Some(message.clone());
                TransitionOutcome::RolledBack { restored, message }
            }
        }
    }

    /// Moves a task to `target`: optimistic write, remote update, rollback on
    /// failure.
    pub async fn transition<S: TaskStore>(&mut self, store: &S, task_id: &str, target: TaskStatus) -> TransitionOutcome {
        let Some(pending) = self.begin(task_id, target) else {
            return TransitionOutcome::Unchanged;
        };
        let result = store.update_task(pending.task_id(), pending.payload()).await;
        self.settle(pending, result)
    }

    /// Deletes a task remotely, then drops it locally.
    ///
    /// # Errors
    /// Returns the store error; the task stays on the board.
    pub async fn remove<S: TaskStore>(&mut self, store: &S, task_id: &str) -> Result<(), ApiError> {
        if self.get(task_id).is_none() {
            let err = ApiError::precondition(format!("No task with id '{task_id}'."));
            self.error = Some(err.user_message());
            return Err(err);
        }
        if let Err(err) = store.delete_task(task_id).await {
            self.error = Some(err.user_message());
            return Err(err);
        }
        self.tasks.retain(|t| t.id != task_id);
        self.ledgers.remove(task_id);
        self.error = None;
        Ok(())
    }

    fn set_status(tasks: &mut [Task], task_id: &str, status: TaskStatus) {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = status;
        }
    }
}
