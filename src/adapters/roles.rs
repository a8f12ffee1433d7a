use crate::adapters::http::PlatformClient;
use crate::domain::model::RoleRecord;
use crate::domain::ports::RoleResolver;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireRole {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) rank: u8,
}

impl From<WireRole> for RoleRecord {
    fn from(role: WireRole) -> Self {
        RoleRecord {
            role_id: role.id,
            rank_level: role.rank,
            name: role.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoleCatalog {
    roles: Vec<WireRole>,
}

/// Numeric selectors match a rank level exactly; anything else matches a role
/// name case-insensitively.
pub fn select_role(roles: &[RoleRecord], selector: &str) -> Option<RoleRecord> {
    let selector = selector.trim();
    if let Ok(level) = selector.parse::<i64>() {
        return roles
            .iter()
            .find(|role| i64::from(role.rank_level) == level)
            .cloned();
    }

    let wanted = selector.to_lowercase();
    roles
        .iter()
        .find(|role| role.name.to_lowercase() == wanted)
        .cloned()
}

impl PlatformClient {
    pub async fn role_catalog(&self) -> Result<Vec<RoleRecord>> {
        let catalog: RoleCatalog = self
            .client
            .get(self.groups_url(&format!("/v1/groups/{}/roles", self.group_id())))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(catalog.roles.into_iter().map(RoleRecord::from).collect())
    }
}

#[async_trait]
impl RoleResolver for PlatformClient {
    async fn resolve_role(&self, selector: &str) -> Result<Option<RoleRecord>> {
        let roles = self.role_catalog().await?;
        tracing::debug!("Fetched {} roles for group {}", roles.len(), self.group_id());
        Ok(select_role(&roles, selector))
    }
}
