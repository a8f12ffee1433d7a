use crate::core::orchestrator::RankChangeOrchestrator;
use crate::core::reply::{help_text, render_outcome, render_rejection};
use crate::core::{CallerRef, CommandEnvelope, DirectoryLookup, RankRequest};
use crate::utils::error::{BridgeError, Result};
use std::sync::Arc;

const HELP_ALIASES: [&str; 2] = ["help", "yardım"];
const RANK_ALIASES: [&str; 2] = ["rank", "rütbe"];

#[derive(Debug, Clone)]
pub struct CommandSettings {
    pub prefix: String,
    pub allowed_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    /// Arguments after the command token.
    Rank(Vec<&'a str>),
}

impl CommandSettings {
    pub fn parse<'a>(&self, content: &'a str) -> Option<Command<'a>> {
        let mut tokens = content.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let name = name.strip_prefix(self.prefix.to_lowercase().as_str())?;

        if HELP_ALIASES.contains(&name) {
            Some(Command::Help)
        } else if RANK_ALIASES.contains(&name) {
            Some(Command::Rank(tokens.collect()))
        } else {
            None
        }
    }

    pub fn is_authorized(&self, caller_roles: &[String]) -> bool {
        caller_roles
            .iter()
            .any(|role| self.allowed_roles.iter().any(|allowed| allowed == role))
    }
}

impl RankRequest {
    /// The selector is every argument after the target, rejoined with spaces.
    pub fn from_args(args: &[&str], requester: CallerRef) -> Result<Self> {
        match args {
            [target, selector @ ..] if !selector.is_empty() => Ok(RankRequest {
                target_identifier: target.to_string(),
                rank_selector: selector.join(" "),
                requester,
            }),
            _ => Err(BridgeError::MalformedCommand {
                reason: "expected a target and a rank".to_string(),
            }),
        }
    }
}

pub struct CommandInterpreter {
    orchestrator: RankChangeOrchestrator,
    directory: Arc<dyn DirectoryLookup>,
    settings: CommandSettings,
}

impl CommandInterpreter {
    pub fn new(
        orchestrator: RankChangeOrchestrator,
        directory: Arc<dyn DirectoryLookup>,
        settings: CommandSettings,
    ) -> Self {
        Self {
            orchestrator,
            directory,
            settings,
        }
    }

    pub fn settings(&self) -> &CommandSettings {
        &self.settings
    }

    /// Returns the reply to send, or `None` when the message is not for us.
    pub async fn handle(&self, envelope: &CommandEnvelope) -> Option<String> {
        if envelope.author_is_bot {
            return None;
        }

        let args = match self.settings.parse(&envelope.content)? {
            Command::Help => return Some(help_text(&self.settings.prefix)),
            Command::Rank(args) => args,
        };

        Some(match self.handle_rank(envelope, &args).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::info!("Rank command from {:?} rejected: {}", envelope.caller, e);
                render_rejection(&e, &self.settings.prefix)
            }
        })
    }

    async fn handle_rank(&self, envelope: &CommandEnvelope, args: &[&str]) -> Result<String> {
        if !self.settings.is_authorized(&envelope.caller_roles) {
            return Err(BridgeError::Unauthorized);
        }

        let request = RankRequest::from_args(args, envelope.caller.clone())?;
        let account_id = self.resolve_target(&request.target_identifier).await?;
        tracing::info!(
            "{:?} requested rank '{}' for account {}",
            request.requester,
            request.rank_selector,
            account_id
        );

        let outcome = self
            .orchestrator
            .change_rank(account_id, &request.rank_selector)
            .await;
        Ok(render_outcome(&outcome))
    }

    async fn resolve_target(&self, identifier: &str) -> Result<u64> {
        if let Ok(account_id) = identifier.parse::<u64>() {
            return Ok(account_id);
        }

        match self.directory.resolve_account_id(identifier).await {
            Ok(Some(account_id)) => Ok(account_id),
            Ok(None) => Err(BridgeError::UserNotFound {
                identifier: identifier.to_string(),
            }),
            Err(e) => {
                tracing::warn!("Username lookup for '{}' failed: {}", identifier, e);
                Err(BridgeError::UserNotFound {
                    identifier: identifier.to_string(),
                })
            }
        }
    }
}
