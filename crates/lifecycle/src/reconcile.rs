//! # Lifecycle Label Reconciler
//!
//! Applies one [`Command`] at a time against the label store, keeping at most
//! one lifecycle label on the item.
//!
//! Error policy:
//! - failing to list labels is logged and treated as "no labels"
//! - failing to remove a label the command asked to remove is returned
//! - failing to evict a conflicting label, or to add the target, is logged
//!   and swallowed

use tracing::{debug, error, info};

use crate::client::{ItemRef, LabelClient};
use crate::commands::{parse_commands, Command, Intent};
use crate::error::LabelClientError;
use crate::event::CommentEvent;

/// Process every lifecycle command in a comment, in order.
///
/// Each command re-reads the item's labels, so later commands observe the
/// effect of earlier ones. Stops at the first hard failure.
///
/// Returns the number of commands applied.
pub async fn handle_comment<C>(client: &C, event: &CommentEvent) -> Result<usize, LabelClientError>
where
    C: LabelClient + ?Sized,
{
    // Collected up front: the regex iterator must not be held across awaits.
    let commands: Vec<Command> = parse_commands(&event.body).collect();
    let mut applied = 0;
    for command in commands {
        debug!(
            item = %event.item,
            actor = %event.actor,
            label = %command.label,
            intent = ?command.intent,
            "Applying lifecycle command"
        );
        reconcile(client, &event.item, command).await?;
        applied += 1;
    }
    Ok(applied)
}

/// Reconcile the item's labels against a single command.
pub async fn reconcile<C>(
    client: &C,
    item: &ItemRef,
    command: Command,
) -> Result<(), LabelClientError>
where
    C: LabelClient + ?Sized,
{
    let labels = match client.fetch_labels(item).await {
        Ok(labels) => labels,
        Err(e) => {
            error!(item = %item, error = %e, "Failed to get labels");
            Vec::new()
        }
    };

    let target = command.label;
    let present = target.is_in(&labels);

    match (command.intent, present) {
        (Intent::Remove, true) => {
            info!(item = %item, label = %target, "Removing lifecycle label");
            client.remove_label(item, target.as_label()).await
        }
        (Intent::Add, false) => {
            for other in target.others().filter(|l| l.is_in(&labels)) {
                if let Err(e) = client.remove_label(item, other.as_label()).await {
                    error!(
                        item = %item,
                        label = %other,
                        error = %e,
                        "GitHub failed to remove the following label"
                    );
                }
            }

            info!(item = %item, label = %target, "Adding lifecycle label");
            if let Err(e) = client.add_label(item, target.as_label()).await {
                error!(
                    item = %item,
                    label = %target,
                    error = %e,
                    "GitHub failed to add the following label"
                );
            }
            Ok(())
        }
        (Intent::Add, true) | (Intent::Remove, false) => {
            debug!(item = %item, label = %target, "Lifecycle label already in requested state");
            Ok(())
        }
    }
}
