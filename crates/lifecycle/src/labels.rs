//! # Lifecycle Label Schema
//!
//! The lifecycle family is a closed set of four mutually exclusive status
//! labels. On GitHub each one is stored as `lifecycle/<name>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix shared by every lifecycle label name.
pub const LABEL_PREFIX: &str = "lifecycle/";

/// Lifecycle status of an issue or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleLabel {
    /// Actively being worked on
    Active,
    /// Exempt from staleness
    Frozen,
    /// Inactive for a while
    Stale,
    /// Inactive for long enough to be closed
    Rotten,
}

impl LifecycleLabel {
    /// Every lifecycle label, in declaration order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Frozen, Self::Stale, Self::Rotten];

    /// Short name used in comment commands (`stale`, `rotten`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Stale => "stale",
            Self::Rotten => "rotten",
        }
    }

    /// Full label name as stored on the item (`lifecycle/stale`).
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Active => "lifecycle/active",
            Self::Frozen => "lifecycle/frozen",
            Self::Stale => "lifecycle/stale",
            Self::Rotten => "lifecycle/rotten",
        }
    }

    /// Every other lifecycle label.
    pub fn others(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |l| *l != self)
    }

    /// Whether this label appears in `labels`. Label names compare
    /// case-insensitively, as GitHub does.
    #[must_use]
    pub fn is_in<S: AsRef<str>>(self, labels: &[S]) -> bool {
        has_label(labels, self.as_label())
    }
}

impl fmt::Display for LifecycleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Error returned when a string is not one of the four lifecycle names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifecycle label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for LifecycleLabel {
    type Err = UnknownLabel;

    /// Accepts the short name or the prefixed label, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix(LABEL_PREFIX).unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|l| l.name() == name)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Case-insensitive label membership.
#[must_use]
pub fn has_label<S: AsRef<str>>(labels: &[S], label: &str) -> bool {
    labels.iter().any(|l| l.as_ref().eq_ignore_ascii_case(label))
}
