//! Transition Validator: decides whether a status change is real and builds
//! the update body for it.
//!
//! The workflow graph is fully connected. Any status may move to any other;
//! moving a task to the status it already has is a no-op.

use super::types::{Task, TaskPayload, TaskStatus};

/// Returns `true` if moving `from` to `to` changes anything.
#[must_use]
pub fn is_transition(from: TaskStatus, to: TaskStatus) -> bool {
    from != to
}

/// Plans a status change for `task`.
///
/// Returns `None` for a self-transition. Otherwise returns the full record
/// with only `status` replaced, ready for a whole-record `PUT`.
#[must_use]
pub fn plan_transition(task: &Task, target: TaskStatus) -> Option<TaskPayload> {
    if !is_transition(task.status, target) {
        return None;
    }
    let mut payload = TaskPayload::from(task);
    payload.status = target;
    Some(payload)
}
