//! Core engine modules for taskboard.

pub mod attachments;
pub mod board;
pub mod client;
pub mod comments;
pub mod config;
pub mod error;
pub mod resolver;
pub mod store;
pub mod transition;
pub mod types;
pub mod views;
