//! Normalized comment event consumed by the reconciler.

use serde::{Deserialize, Serialize};

use crate::client::ItemRef;

/// What happened to the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentAction {
    Created,
    Edited,
    Deleted,
    /// Unknown action (catch-all to avoid parse failures)
    #[serde(other)]
    Unknown,
}

/// A single comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    /// Item the comment was left on
    pub item: ItemRef,
    /// Raw comment text
    pub body: String,
    /// Login of the commenter. Not used for authorization.
    pub actor: String,
    /// Comment action
    pub action: CommentAction,
}

impl CommentEvent {
    /// A newly created comment.
    #[must_use]
    pub fn created(item: ItemRef, body: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            item,
            body: body.into(),
            actor: actor.into(),
            action: CommentAction::Created,
        }
    }
}
