use crate::domain::ports::ConfigProvider;
use reqwest::Client;
use std::sync::Arc;

pub const DEFAULT_USERS_API: &str = "https://users.roblox.com";
pub const DEFAULT_AUTH_API: &str = "https://auth.roblox.com";
pub const DEFAULT_GROUPS_API: &str = "https://groups.roblox.com";

const SESSION_COOKIE_NAME: &str = ".ROBLOSECURITY";

/// Read-only platform settings shared by every request.
#[derive(Clone)]
pub struct PlatformSettings {
    pub group_id: u64,
    pub session_cookie: String,
    pub users_api: String,
    pub auth_api: String,
    pub groups_api: String,
}

impl PlatformSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            group_id: config.group_id(),
            session_cookie: config.session_cookie().to_string(),
            users_api: config.users_api().to_string(),
            auth_api: config.auth_api().to_string(),
            groups_api: config.groups_api().to_string(),
        }
    }
}

impl std::fmt::Debug for PlatformSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformSettings")
            .field("group_id", &self.group_id)
            .field("session_cookie", &"<redacted>")
            .field("users_api", &self.users_api)
            .field("auth_api", &self.auth_api)
            .field("groups_api", &self.groups_api)
            .finish()
    }
}

/// Client for the group platform's public HTTP APIs. Implements every port.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    pub(crate) client: Client,
    pub(crate) settings: Arc<PlatformSettings>,
}

impl PlatformClient {
    pub fn new(settings: PlatformSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: PlatformSettings) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }

    pub fn group_id(&self) -> u64 {
        self.settings.group_id
    }

    pub(crate) fn session_cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE_NAME, self.settings.session_cookie)
    }

    pub(crate) fn users_url(&self, path: &str) -> String {
        join_url(&self.settings.users_api, path)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        join_url(&self.settings.auth_api, path)
    }

    pub(crate) fn groups_url(&self, path: &str) -> String {
        join_url(&self.settings.groups_api, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
pub(crate) fn settings_for(base_url: &str) -> PlatformSettings {
    PlatformSettings {
        group_id: 4242,
        session_cookie: "test-cookie".to_string(),
        users_api: base_url.to_string(),
        auth_api: base_url.to_string(),
        groups_api: base_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_strips_trailing_slash() {
        assert_eq!(
            join_url("https://groups.roblox.com/", "/v1/groups/1/roles"),
            "https://groups.roblox.com/v1/groups/1/roles"
        );
        assert_eq!(join_url("http://127.0.0.1:80", "/x"), "http://127.0.0.1:80/x");
    }

    #[test]
    fn test_cookie_header_and_debug_redaction() {
        let client = PlatformClient::new(settings_for("http://localhost"));
        assert_eq!(client.session_cookie_header(), ".ROBLOSECURITY=test-cookie");
        assert!(!format!("{:?}", client).contains("test-cookie"));
    }
}
