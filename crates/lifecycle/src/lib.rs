//! Lifecycle label manager for GitHub issues and pull requests.
//!
//! This crate provides:
//! - Extraction of `/lifecycle` and `/remove-lifecycle` commands from comments
//! - Reconciliation of the mutually exclusive `lifecycle/*` labels
//! - A GitHub REST implementation of the label store
//! - Webhook payload parsing and signature verification
//! - HTTP server for webhook handling (standalone service)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Every label store call can fail

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod help;
pub mod labels;
pub mod reconcile;
pub mod server;
pub mod webhooks;

pub use client::{ItemRef, LabelClient};
pub use commands::{parse_commands, Command, Intent};
pub use config::Config;
pub use error::LabelClientError;
pub use event::{CommentAction, CommentEvent};
pub use github::GitHubLabelClient;
pub use labels::LifecycleLabel;
pub use reconcile::{handle_comment, reconcile};
pub use webhooks::{verify_webhook_signature, IssueCommentEvent};
