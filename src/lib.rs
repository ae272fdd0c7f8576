//! Task and file dashboard over a remote task API.
//!
//! The heart of the crate is the status workflow in [`engine::board`]:
//! optimistic status changes with rollback. The `taskboard` binary renders
//! the table and kanban views in the terminal.

pub mod engine;
