use crate::core::{FailureReason, Outcome};
use crate::utils::error::BridgeError;

pub fn help_text(prefix: &str) -> String {
    format!(
        "**Bot Commands**\n\n\
         `{p}rank <username or user id> <rank level or rank name>` - Changes the user's rank.\n\
         **Examples:**\n\
         `{p}rank TestPlayer 255` - Change rank by rank level.\n\
         `{p}rank TestPlayer Admin` - Change rank by rank name.\n\n\
         **Note:** Only authorized staff can use these commands.",
        p = prefix
    )
}

pub fn usage_text(prefix: &str) -> String {
    format!(
        "Incorrect usage.\n\
         Correct usage: `{p}rank <username or user id> <rank level or rank name>`\n\
         **Examples:**\n\
         `{p}rank TestPlayer 255`   - Change rank by rank level.\n\
         `{p}rank TestPlayer Admin` - Change rank by rank name.",
        p = prefix
    )
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Promoted(c) => format!(
            "User **{}** was promoted to **{}**.",
            c.account.display_name, c.role.name
        ),
        Outcome::Demoted(c) => format!(
            "User **{}** was demoted to **{}**.",
            c.account.display_name, c.role.name
        ),
        Outcome::Unchanged(c) => format!(
            "User **{}** already holds **{}**; rank unchanged.",
            c.account.display_name, c.role.name
        ),
        Outcome::Assigned(c) => format!(
            "User **{}** was assigned **{}**.",
            c.account.display_name, c.role.name
        ),
        Outcome::Failed(FailureReason::NoToken) => {
            "Could not obtain an anti-forgery token; rank change aborted.".to_string()
        }
        Outcome::Failed(FailureReason::UnknownRank { selector }) => {
            format!("No valid rank found for **{}**.", selector)
        }
        Outcome::Failed(FailureReason::MutationRejected { status, .. }) => format!(
            "The group service rejected the rank change (status {}).",
            status
        ),
    }
}

/// Replies for failures that stop a command before orchestration.
pub fn render_rejection(error: &BridgeError, prefix: &str) -> String {
    match error {
        BridgeError::Unauthorized => {
            "You are not allowed to use this command. Only authorized staff can use it."
                .to_string()
        }
        BridgeError::UserNotFound { identifier } => {
            format!("User \"{}\" was not found.", identifier)
        }
        BridgeError::MalformedCommand { .. } => usage_text(prefix),
        other => format!("Something went wrong: {}", other.user_friendly_message()),
    }
}
