use crate::utils::error::RemoteStatus;
use serde::{Deserialize, Serialize};

/// Opaque reference to whoever sent a chat command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerRef(pub String);

/// One inbound chat message as seen by the command interpreter.
#[derive(Debug, Clone)]
pub struct CommandEnvelope {
    pub content: String,
    pub author_is_bot: bool,
    pub caller: CallerRef,
    pub caller_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRequest {
    pub target_identifier: String,
    pub rank_selector: String,
    pub requester: CallerRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAccount {
    pub account_id: u64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role_id: u64,
    pub rank_level: u8,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MembershipState {
    pub current_rank_level: Option<u8>,
}

/// Anti-forgery token for exactly one mutating call.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfSession {
    token: String,
}

impl CsrfSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for CsrfSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfSession")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A role change that took effect on the remote group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankChange {
    pub account: ResolvedAccount,
    pub role: RoleRecord,
    pub previous_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NoToken,
    UnknownRank { selector: String },
    MutationRejected { status: RemoteStatus, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Promoted(RankChange),
    Demoted(RankChange),
    Unchanged(RankChange),
    Assigned(RankChange),
    Failed(FailureReason),
}

impl Outcome {
    /// Classifies a successful mutation against the level held before it.
    pub fn classify(change: RankChange) -> Self {
        let new_level = change.role.rank_level;
        match change.previous_level {
            None => Outcome::Assigned(change),
            Some(current) if current < new_level => Outcome::Promoted(change),
            Some(current) if current > new_level => Outcome::Demoted(change),
            Some(_) => Outcome::Unchanged(change),
        }
    }
}
