use crate::adapters::http::PlatformClient;
use crate::adapters::roles::WireRole;
use crate::domain::model::MembershipState;
use crate::domain::ports::MemberStateReader;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MembershipList {
    data: Vec<GroupMembership>,
}

#[derive(Debug, Deserialize)]
struct GroupMembership {
    group: GroupRef,
    role: WireRole,
}

#[derive(Debug, Deserialize)]
struct GroupRef {
    id: u64,
}

#[async_trait]
impl MemberStateReader for PlatformClient {
    async fn current_rank(&self, account_id: u64) -> Result<MembershipState> {
        let memberships: MembershipList = self
            .client
            .get(self.groups_url(&format!("/v2/users/{}/groups/roles", account_id)))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let current_rank_level = memberships
            .data
            .into_iter()
            .find(|m| m.group.id == self.group_id())
            .map(|m| m.role.rank);
        Ok(MembershipState { current_rank_level })
    }
}
