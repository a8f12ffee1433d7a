use crate::domain::model::{CsrfSession, MembershipState, RoleRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn group_id(&self) -> u64;
    fn session_cookie(&self) -> &str;
    fn command_prefix(&self) -> &str;
    fn allowed_roles(&self) -> &[String];
    fn console_roles(&self) -> &[String];
    fn listen_addr(&self) -> &str;
    fn users_api(&self) -> &str;
    fn auth_api(&self) -> &str;
    fn groups_api(&self) -> &str;
}

#[async_trait]
pub trait CredentialSession: Send + Sync {
    /// Fails with `InvalidCredential` or `TokenUnavailable`.
    async fn acquire_token(&self) -> Result<CsrfSession>;
}

#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// `Ok(None)` when no non-banned account carries this username.
    async fn resolve_account_id(&self, username: &str) -> Result<Option<u64>>;
    async fn display_name(&self, account_id: u64) -> Result<Option<String>>;
}

#[async_trait]
pub trait RoleResolver: Send + Sync {
    async fn resolve_role(&self, selector: &str) -> Result<Option<RoleRecord>>;
}

#[async_trait]
pub trait MemberStateReader: Send + Sync {
    /// An absent level means the account holds no role in the configured group.
    async fn current_rank(&self, account_id: u64) -> Result<MembershipState>;
}

#[async_trait]
pub trait RankMutator: Send + Sync {
    /// Succeeds only on HTTP 200; everything else is `RemoteRejected`.
    async fn apply_role(&self, account_id: u64, role_id: u64, session: &CsrfSession) -> Result<()>;
}
