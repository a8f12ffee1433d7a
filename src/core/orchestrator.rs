use crate::core::{
    CredentialSession, DirectoryLookup, FailureReason, MemberStateReader, Outcome, RankChange,
    RankMutator, ResolvedAccount, RoleResolver,
};
use crate::utils::error::{BridgeError, RemoteStatus};
use std::sync::Arc;

/// Placeholder used when the target's profile cannot be read.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// Runs one rank change: token, role, profile, current rank, mutation.
///
/// Each call is independent. Nothing is cached between calls, so the role
/// catalog and the anti-forgery token are always fetched fresh.
#[derive(Clone)]
pub struct RankChangeOrchestrator {
    credentials: Arc<dyn CredentialSession>,
    roles: Arc<dyn RoleResolver>,
    directory: Arc<dyn DirectoryLookup>,
    members: Arc<dyn MemberStateReader>,
    mutator: Arc<dyn RankMutator>,
}

impl RankChangeOrchestrator {
    pub fn new(
        credentials: Arc<dyn CredentialSession>,
        roles: Arc<dyn RoleResolver>,
        directory: Arc<dyn DirectoryLookup>,
        members: Arc<dyn MemberStateReader>,
        mutator: Arc<dyn RankMutator>,
    ) -> Self {
        Self {
            credentials,
            roles,
            directory,
            members,
            mutator,
        }
    }

    /// Wires every port to the same backend.
    pub fn from_platform<P>(platform: Arc<P>) -> Self
    where
        P: CredentialSession
            + RoleResolver
            + DirectoryLookup
            + MemberStateReader
            + RankMutator
            + 'static,
    {
        Self::new(
            platform.clone(),
            platform.clone(),
            platform.clone(),
            platform.clone(),
            platform,
        )
    }

    pub async fn change_rank(&self, account_id: u64, rank_selector: &str) -> Outcome {
        let session = match self.credentials.acquire_token().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("❌ Rank change for {} aborted, no CSRF token: {}", account_id, e);
                return Outcome::Failed(FailureReason::NoToken);
            }
        };

        let role = match self.roles.resolve_role(rank_selector).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                tracing::error!("❌ No role matches selector '{}'", rank_selector);
                return Outcome::Failed(FailureReason::UnknownRank {
                    selector: rank_selector.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("❌ Role catalog unavailable for selector '{}': {}", rank_selector, e);
                return Outcome::Failed(FailureReason::UnknownRank {
                    selector: rank_selector.to_string(),
                });
            }
        };
        tracing::debug!(
            "Selector '{}' resolved to role {} ({}, level {})",
            rank_selector,
            role.role_id,
            role.name,
            role.rank_level
        );

        let display_name = match self.directory.display_name(account_id).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_DISPLAY_NAME.to_string(),
            Err(e) => {
                tracing::warn!("Display name for {} unavailable: {}", account_id, e);
                UNKNOWN_DISPLAY_NAME.to_string()
            }
        };

        let previous_level = match self.members.current_rank(account_id).await {
            Ok(state) => state.current_rank_level,
            Err(e) => {
                tracing::warn!("Current rank for {} unavailable: {}", account_id, e);
                None
            }
        };

        if let Err(e) = self
            .mutator
            .apply_role(account_id, role.role_id, &session)
            .await
        {
            let (status, body) = match e {
                BridgeError::RemoteRejected { status, body } => (status, body),
                other => (RemoteStatus::Unknown, other.to_string()),
            };
            tracing::error!(
                "❌ Rank change rejected. Status: {}, Response: {}",
                status,
                body
            );
            return Outcome::Failed(FailureReason::MutationRejected { status, body });
        }

        let outcome = Outcome::classify(RankChange {
            account: ResolvedAccount {
                account_id,
                display_name,
            },
            role,
            previous_level,
        });
        tracing::info!("✅ Rank change applied: {:?}", outcome);
        outcome
    }
}
