//! User-facing help for the lifecycle command.

use serde::Serialize;

/// Help entry for one comment command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
    pub who_can_use: &'static str,
    pub examples: Vec<&'static str>,
}

#[must_use]
pub fn command_help() -> CommandHelp {
    CommandHelp {
        usage: "/[remove-]lifecycle <active|frozen|stale|rotten>",
        description: "Flags an issue or PR as active/frozen/stale/rotten, or clears the flag. \
                      Setting one lifecycle label removes the others.",
        who_can_use: "Anyone can trigger this command.",
        examples: vec![
            "/lifecycle frozen",
            "/remove-lifecycle stale",
            "/lh-lifecycle rotten",
        ],
    }
}
