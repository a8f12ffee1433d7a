use crate::adapters::http::PlatformClient;
use crate::domain::model::CsrfSession;
use crate::domain::ports::RankMutator;
use crate::utils::error::{BridgeError, RemoteStatus, Result};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleAssignment {
    role_id: u64,
}

#[async_trait]
impl RankMutator for PlatformClient {
    async fn apply_role(&self, account_id: u64, role_id: u64, session: &CsrfSession) -> Result<()> {
        let url = self.groups_url(&format!(
            "/v1/groups/{}/users/{}",
            self.group_id(),
            account_id
        ));
        tracing::debug!("Assigning role {} to account {}", role_id, account_id);

        let response = self
            .client
            .patch(url)
            .header("X-CSRF-TOKEN", session.token())
            .header(COOKIE, self.session_cookie_header())
            .json(&RoleAssignment { role_id })
            .send()
            .await
            .map_err(|e| BridgeError::RemoteRejected {
                status: RemoteStatus::Unknown,
                body: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        Err(BridgeError::RemoteRejected {
            status: RemoteStatus::Code(status.as_u16()),
            body,
        })
    }
}
