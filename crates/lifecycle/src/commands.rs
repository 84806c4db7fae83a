//! Lifecycle command extraction from free-form comment text.
//!
//! A command is a line of the form `/[lh-][remove-]lifecycle <label>`.
//! Anything that does not match exactly is ignored.

use regex::Regex;
use std::sync::LazyLock;

use crate::labels::LifecycleLabel;

static LIFECYCLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^/(?:lh-)?(remove-)?lifecycle (active|frozen|stale|rotten)\s*$").unwrap()
});

/// Whether a command sets or clears its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add,
    Remove,
}

/// A single parsed lifecycle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Label the command targets
    pub label: LifecycleLabel,
    /// Add or remove
    pub intent: Intent,
}

impl Command {
    #[must_use]
    pub const fn add(label: LifecycleLabel) -> Self {
        Self {
            label,
            intent: Intent::Add,
        }
    }

    #[must_use]
    pub const fn remove(label: LifecycleLabel) -> Self {
        Self {
            label,
            intent: Intent::Remove,
        }
    }
}

/// Iterate over the lifecycle commands in `body`, in document order.
///
/// The iterator is lazy and borrows `body`; call again to restart.
pub fn parse_commands(body: &str) -> impl Iterator<Item = Command> + '_ {
    LIFECYCLE_RE.captures_iter(body).filter_map(|caps| {
        let label = caps.get(2)?.as_str().parse().ok()?;
        let intent = if caps.get(1).is_some() {
            Intent::Remove
        } else {
            Intent::Add
        };
        Some(Command { label, intent })
    })
}
