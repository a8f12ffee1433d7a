use crate::adapters::http::{DEFAULT_AUTH_API, DEFAULT_GROUPS_API, DEFAULT_USERS_API};
use crate::core::ConfigProvider;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Deserialize)]
pub struct TomlConfig {
    pub platform: PlatformSection,
    #[serde(default)]
    pub commands: CommandsSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Clone, Deserialize)]
pub struct PlatformSection {
    pub group_id: u64,
    pub session_cookie: String,
    #[serde(default = "default_users_api")]
    pub users_api: String,
    #[serde(default = "default_auth_api")]
    pub auth_api: String,
    #[serde(default = "default_groups_api")]
    pub groups_api: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_roles")]
    pub allowed_roles: Vec<String>,
    #[serde(default = "default_roles")]
    pub console_roles: Vec<String>,
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            allowed_roles: default_roles(),
            console_roles: default_roles(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_users_api() -> String {
    DEFAULT_USERS_API.to_string()
}

fn default_auth_api() -> String {
    DEFAULT_AUTH_API.to_string()
}

fn default_groups_api() -> String {
    DEFAULT_GROUPS_API.to_string()
}

fn default_prefix() -> String {
    "tca!".to_string()
}

fn default_roles() -> Vec<String> {
    vec!["Rank Verme".to_string()]
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BridgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BridgeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl std::fmt::Debug for TomlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomlConfig")
            .field("group_id", &self.platform.group_id)
            .field("session_cookie", &"<redacted>")
            .field("commands", &self.commands)
            .field("server", &self.server)
            .finish()
    }
}

impl ConfigProvider for TomlConfig {
    fn group_id(&self) -> u64 {
        self.platform.group_id
    }

    fn session_cookie(&self) -> &str {
        &self.platform.session_cookie
    }

    fn command_prefix(&self) -> &str {
        &self.commands.prefix
    }

    fn allowed_roles(&self) -> &[String] {
        &self.commands.allowed_roles
    }

    fn console_roles(&self) -> &[String] {
        &self.commands.console_roles
    }

    fn listen_addr(&self) -> &str {
        &self.server.listen
    }

    fn users_api(&self) -> &str {
        &self.platform.users_api
    }

    fn auth_api(&self) -> &str {
        &self.platform.auth_api
    }

    fn groups_api(&self) -> &str {
        &self.platform.groups_api
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)?;
        if self.platform.session_cookie.contains("${") {
            return Err(BridgeError::MissingConfigError {
                field: "platform.session_cookie".to_string(),
            });
        }
        Ok(())
    }
}
