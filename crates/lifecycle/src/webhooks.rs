//! GitHub webhook payload parsing and signature verification.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::client::ItemRef;
use crate::event::{CommentAction, CommentEvent};

type HmacSha256 = Hmac<Sha256>;

/// Verify a GitHub `X-Hub-Signature-256` header against the raw body.
///
/// # Arguments
/// * `body` - Raw webhook body bytes
/// * `signature` - Header value, `sha256=<hex>`
/// * `secret` - Webhook secret
#[must_use]
pub fn verify_webhook_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    let Some(hex_signature) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(signature_bytes) = hex::decode(hex_signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let computed = mac.finalize().into_bytes();

    computed.as_slice().ct_eq(&signature_bytes).into()
}

/// GitHub `issue_comment` event payload (simplified)
#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentEvent {
    /// created, edited or deleted
    pub action: CommentAction,
    /// Issue or pull request the comment belongs to
    pub issue: Issue,
    /// The comment itself
    pub comment: Comment,
    /// Repository info
    pub repository: Repository,
}

/// GitHub Issue. Pull requests arrive as issues with a `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Present only for pull requests
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// GitHub issue comment
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Comment text
    #[serde(default)]
    pub body: Option<String>,
    /// Comment author
    pub user: GitHubUser,
}

/// GitHub Repository
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Repository owner
    pub owner: GitHubUser,
}

/// GitHub User
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    /// User login
    pub login: String,
}

impl From<IssueCommentEvent> for CommentEvent {
    fn from(payload: IssueCommentEvent) -> Self {
        Self {
            item: ItemRef {
                owner: payload.repository.owner.login,
                repo: payload.repository.name,
                number: payload.issue.number,
                is_pull_request: payload.issue.pull_request.is_some(),
            },
            body: payload.comment.body.unwrap_or_default(),
            actor: payload.comment.user.login,
            action: payload.action,
        }
    }
}
