//! View projections: table rows and kanban columns.
//!
//! Both views read the same `&[Task]` slice, so a change made through one is
//! visible in the other as soon as the board updates. Labels and colors are a
//! static lookup keyed by the canonical enums.

use super::types::{Priority, PriorityBand, Task, TaskStatus};
use colored::Color;
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";

/// Display label plus terminal color for an enum value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub label: &'static str,
    pub color: Color,
}

#[must_use]
pub fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Pending => Style {
            label: "Pending",
            color: Color::Yellow,
        },
        TaskStatus::InProgress => Style {
            label: "In progress",
            color: Color::Blue,
        },
        TaskStatus::Done => Style {
            label: "Done",
            color: Color::Green,
        },
    }
}

#[must_use]
pub fn priority_style(priority: Priority) -> Style {
    match priority.band() {
        PriorityBand::High => Style {
            label: "High",
            color: Color::Red,
        },
        PriorityBand::Normal => Style {
            label: "Normal",
            color: Color::Yellow,
        },
        PriorityBand::Low => Style {
            label: "Low",
            color: Color::Cyan,
        },
    }
}

/// One table row, all strings already derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub title: String,
    pub project: String,
    pub status: TaskStatus,
    pub status_label: &'static str,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub assignee: String,
    pub due: String,
}

impl TableRow {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            project: task
                .projeto
                .as_ref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.title.clone()),
            status: task.status,
            status_label: status_style(task.status).label,
            priority: task.priority,
            priority_label: priority_style(task.priority).label,
            assignee: task
                .assigned_to
                .as_ref()
                .and_then(|u| u.name.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            due: task
                .due_date
                .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// One row per task, in collection order.
#[must_use]
pub fn table_rows(tasks: &[Task]) -> Vec<TableRow> {
    tasks.iter().map(TableRow::from_task).collect()
}

/// A kanban column: every task whose status is `status`.
#[derive(Debug, Clone, Serialize)]
pub struct KanbanColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

/// Partitions tasks into exactly one column per status, in board order.
///
/// Every task lands in exactly one column; order within a column is the
/// collection's order.
#[must_use]
pub fn kanban_columns(tasks: &[Task]) -> Vec<KanbanColumn<'_>> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| KanbanColumn {
            status,
            tasks: tasks.iter().filter(|t| t.status == status).collect(),
        })
        .collect()
}

/// Aggregate counts of tasks by status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ProjectRef, UserRef};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn make_task(id: &str, status: TaskStatus, priority: u8) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: None,
            status,
            priority: Priority(priority),
            due_date: None,
            assigned_to_id: None,
            author_id: None,
            projeto_id: None,
            created_at: None,
            updated_at: None,
            projeto: None,
            assigned_to: None,
            comments: Vec::new(),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            make_task("a", TaskStatus::Done, 0),
            make_task("b", TaskStatus::Pending, 2),
            make_task("c", TaskStatus::InProgress, 1),
            make_task("d", TaskStatus::Pending, 3),
        ]
    }

    #[test]
    fn test_kanban_has_three_columns_in_order() {
        let tasks = sample();
        let columns = kanban_columns(&tasks);
        let order: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(order, TaskStatus::ALL.to_vec());
        let pending: Vec<_> = columns[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(pending, ["b", "d"]);
    }

    #[test]
    fn test_table_and_kanban_show_same_tasks() {
        let tasks = sample();
        let rows = table_rows(&tasks);
        let columns = kanban_columns(&tasks);

        let in_columns: Vec<_> = columns.iter().flat_map(|c| c.tasks.iter().map(|t| t.id.clone())).collect();
        let unique: HashSet<_> = in_columns.iter().cloned().collect();
        let in_table: HashSet<_> = rows.iter().map(|r| r.id.clone()).collect();

        assert_eq!(in_columns.len(), tasks.len());
        assert_eq!(unique, in_table);
    }

    #[test]
    fn test_empty_board_still_has_columns() {
        let columns = kanban_columns(&[]);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| c.tasks.is_empty()));
    }

    #[test]
    fn test_table_row_fallbacks() {
        let row = TableRow::from_task(&make_task("a", TaskStatus::Pending, 1));
        assert_eq!(row.project, NOT_AVAILABLE);
        assert_eq!(row.assignee, NOT_AVAILABLE);
        assert_eq!(row.due, NOT_AVAILABLE);
        assert_eq!(row.status_label, "Pending");
        assert_eq!(row.priority_label, "Normal");
    }

    #[test]
    fn test_table_row_decorations() {
        let mut task = make_task("a", TaskStatus::Done, 2);
        task.projeto = Some(ProjectRef {
            id: "p1".into(),
            title: "Website".into(),
        });
        task.assigned_to = Some(UserRef {
            id: "u1".into(),
            name: Some("Ana".into()),
        });
        task.due_date = Some(Utc.with_ymd_and_hms(2025, 6, 30, 23, 0, 0).unwrap());

        let row = TableRow::from_task(&task);
        assert_eq!(row.project, "Website");
        assert_eq!(row.assignee, "Ana");
        assert_eq!(row.due, "2025-06-30");
        assert_eq!(row.priority_label, "High");
    }

    #[test]
    fn test_styles() {
        assert_eq!(status_style(TaskStatus::Done).color, Color::Green);
        assert_eq!(priority_style(Priority(0)).label, "Low");
        assert_eq!(priority_style(Priority(9)).label, "High");
    }

    #[test]
    fn test_status_counts() {
        let counts = StatusCounts::from_tasks(&sample());
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 1);
        assert_eq!(counts.total(), 4);
    }
}
