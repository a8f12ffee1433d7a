pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::http::{DEFAULT_AUTH_API, DEFAULT_GROUPS_API, DEFAULT_USERS_API};
use crate::core::interpreter::CommandSettings;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_positive_id, validate_secret,
    validate_socket_addr, validate_url,
};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "rank-bridge")]
#[command(about = "Chat command bridge for changing group member ranks")]
pub struct CliConfig {
    #[arg(long, env = "ROBLOX_GROUP_ID", default_value = "0")]
    pub group_id: u64,

    #[arg(long, env = "ROBLOX_COOKIE", default_value = "", hide_env_values = true)]
    pub session_cookie: String,

    #[arg(long, env = "BRIDGE_PREFIX", default_value = "tca!")]
    pub prefix: String,

    #[arg(long, env = "BRIDGE_ALLOWED_ROLES", value_delimiter = ',', default_value = "Rank Verme")]
    pub allowed_roles: Vec<String>,

    /// Roles attributed to the local console operator.
    #[arg(long, env = "BRIDGE_CONSOLE_ROLES", value_delimiter = ',', default_value = "Rank Verme")]
    pub console_roles: Vec<String>,

    #[arg(long, env = "BRIDGE_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: String,

    #[arg(long, default_value = DEFAULT_USERS_API)]
    pub users_api: String,

    #[arg(long, default_value = DEFAULT_AUTH_API)]
    pub auth_api: String,

    #[arg(long, default_value = DEFAULT_GROUPS_API)]
    pub groups_api: String,

    /// Load settings from a TOML file instead of flags.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("group_id", &self.group_id)
            .field("session_cookie", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("allowed_roles", &self.allowed_roles)
            .field("console_roles", &self.console_roles)
            .field("listen", &self.listen)
            .field("users_api", &self.users_api)
            .field("auth_api", &self.auth_api)
            .field("groups_api", &self.groups_api)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn group_id(&self) -> u64 {
        self.group_id
    }

    fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    fn command_prefix(&self) -> &str {
        &self.prefix
    }

    fn allowed_roles(&self) -> &[String] {
        &self.allowed_roles
    }

    fn console_roles(&self) -> &[String] {
        &self.console_roles
    }

    fn listen_addr(&self) -> &str {
        &self.listen
    }

    fn users_api(&self) -> &str {
        &self.users_api
    }

    fn auth_api(&self) -> &str {
        &self.auth_api
    }

    fn groups_api(&self) -> &str {
        &self.groups_api
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_positive_id("group_id", config.group_id())?;
    validate_secret("session_cookie", config.session_cookie())?;
    validate_non_empty_string("prefix", config.command_prefix())?;
    validate_non_empty_list("allowed_roles", config.allowed_roles())?;
    validate_socket_addr("listen", config.listen_addr())?;
    validate_url("users_api", config.users_api())?;
    validate_url("auth_api", config.auth_api())?;
    validate_url("groups_api", config.groups_api())?;
    Ok(())
}

impl CommandSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            prefix: config.command_prefix().to_string(),
            allowed_roles: config
                .allowed_roles()
                .iter()
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect(),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["rank-bridge"];
        argv.extend_from_slice(args);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--group-id", "4242", "--session-cookie", "secret"]);
        assert_eq!(config.prefix, "tca!");
        assert_eq!(config.allowed_roles, vec!["Rank Verme"]);
        assert_eq!(config.groups_api, DEFAULT_GROUPS_API);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_cookie_fails_validation() {
        let config = parse(&["--group-id", "4242", "--session-cookie", " "]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_allowed_roles_list() {
        let config = parse(&[
            "--group-id",
            "1",
            "--session-cookie",
            "s",
            "--allowed-roles",
            "Rank Verme, Officer",
        ]);
        let settings = CommandSettings::from_config(&config);
        assert_eq!(settings.allowed_roles, vec!["Rank Verme", "Officer"]);
        assert!(!format!("{:?}", config).contains("\"s\""));
    }
}
