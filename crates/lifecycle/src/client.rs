//! Label store abstraction.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LabelClientError;

/// Identity of an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue or PR number
    pub number: u64,
    /// Whether the item is a pull request
    #[serde(default)]
    pub is_pull_request: bool,
}

impl ItemRef {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
            is_pull_request: false,
        }
    }

    #[must_use]
    pub fn pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Remote store holding the labels of issues and pull requests.
///
/// Implementations must not cache: every call reflects the store at the time
/// it is made.
#[async_trait]
pub trait LabelClient: Send + Sync {
    /// List the label names currently on the item.
    async fn fetch_labels(&self, item: &ItemRef) -> Result<Vec<String>, LabelClientError>;

    /// Add a single label to the item.
    async fn add_label(&self, item: &ItemRef, label: &str) -> Result<(), LabelClientError>;

    /// Remove a single label from the item.
    async fn remove_label(&self, item: &ItemRef, label: &str) -> Result<(), LabelClientError>;
}
