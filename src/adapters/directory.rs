use crate::adapters::http::PlatformClient;
use crate::domain::ports::DirectoryLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsernamesRequest<'a> {
    usernames: [&'a str; 1],
    exclude_banned_users: bool,
}

#[derive(Debug, Deserialize)]
struct UsernamesResponse {
    data: Vec<UsernameMatch>,
}

#[derive(Debug, Deserialize)]
struct UsernameMatch {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    name: Option<String>,
}

#[async_trait]
impl DirectoryLookup for PlatformClient {
    async fn resolve_account_id(&self, username: &str) -> Result<Option<u64>> {
        tracing::debug!("Resolving username '{}'", username);
        let body = UsernamesRequest {
            usernames: [username],
            exclude_banned_users: true,
        };
        let response: UsernamesResponse = self
            .client
            .post(self.users_url("/v1/usernames/users"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.data.first().map(|m| m.id))
    }

    async fn display_name(&self, account_id: u64) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.users_url(&format!("/v1/users/{}", account_id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let profile: UserProfile = response.error_for_status()?.json().await?;
        Ok(profile.name.filter(|name| !name.is_empty()))
    }
}
