pub mod interpreter;
pub mod orchestrator;
pub mod reply;

pub use crate::domain::model::{
    CallerRef, CommandEnvelope, CsrfSession, FailureReason, MembershipState, Outcome, RankChange,
    RankRequest, ResolvedAccount, RoleRecord,
};
pub use crate::domain::ports::{
    ConfigProvider, CredentialSession, DirectoryLookup, MemberStateReader, RankMutator,
    RoleResolver,
};
pub use crate::utils::error::Result;
