use crate::adapters::http::PlatformClient;
use crate::domain::model::CsrfSession;
use crate::domain::ports::CredentialSession;
use crate::utils::error::{BridgeError, Result};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use serde::Deserialize;

const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    id: Option<u64>,
}

#[async_trait]
impl CredentialSession for PlatformClient {
    async fn acquire_token(&self) -> Result<CsrfSession> {
        let response = self
            .client
            .get(self.users_url("/v1/users/authenticated"))
            .header(COOKIE, self.session_cookie_header())
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            tracing::error!("❌ Session cookie rejected ({}); a new cookie is required", response.status());
            return Err(BridgeError::InvalidCredential);
        }

        let identity: AuthenticatedUser = response.error_for_status()?.json().await?;
        let Some(account_id) = identity.id else {
            tracing::error!("❌ Session cookie is not authenticated; a new cookie is required");
            return Err(BridgeError::InvalidCredential);
        };
        tracing::debug!("Session cookie valid for account {}, requesting CSRF token", account_id);

        // The platform only hands out a token on a rejected state-changing call.
        let response = match self
            .client
            .post(self.auth_url("/v2/logout"))
            .header(COOKIE, self.session_cookie_header())
            .json(&serde_json::json!({}))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("CSRF challenge request failed: {}", e);
                return Err(BridgeError::TokenUnavailable);
            }
        };

        if response.status().is_success() {
            tracing::error!("Session termination succeeded without a CSRF challenge");
            return Err(BridgeError::TokenUnavailable);
        }

        response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .map(CsrfSession::new)
            .ok_or_else(|| {
                tracing::error!(
                    "CSRF challenge (status {}) carried no token header",
                    response.status()
                );
                BridgeError::TokenUnavailable
            })
    }
}
