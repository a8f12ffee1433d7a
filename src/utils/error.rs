use std::fmt;
use thiserror::Error;

/// Status carried by a rejected mutation. Transport failures have no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    Code(u16),
    Unknown,
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteStatus::Code(code) => write!(f, "{}", code),
            RemoteStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Stored session secret is not authenticated")]
    InvalidCredential,

    #[error("Anti-forgery token was not issued")]
    TokenUnavailable,

    #[error("No role matches rank selector '{selector}'")]
    UnknownRank { selector: String },

    #[error("User '{identifier}' not found")]
    UserNotFound { identifier: String },

    #[error("Lookup of {what} failed: {message}")]
    LookupFailed { what: String, message: String },

    #[error("Remote service rejected the request (status {status}): {body}")]
    RemoteRejected { status: RemoteStatus, body: String },

    #[error("Caller is not authorized")]
    Unauthorized,

    #[error("Malformed command: {reason}")]
    MalformedCommand { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Input,
    Remote,
}

impl BridgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::ApiError(_)
            | BridgeError::IoError(_)
            | BridgeError::SerializationError(_)
            | BridgeError::LookupFailed { .. } => ErrorCategory::Network,
            BridgeError::ConfigError { .. }
            | BridgeError::MissingConfigError { .. }
            | BridgeError::InvalidConfigValueError { .. }
            | BridgeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BridgeError::InvalidCredential
            | BridgeError::TokenUnavailable
            | BridgeError::Unauthorized => ErrorCategory::Authentication,
            BridgeError::UnknownRank { .. }
            | BridgeError::UserNotFound { .. }
            | BridgeError::MalformedCommand { .. } => ErrorCategory::Input,
            BridgeError::RemoteRejected { .. } => ErrorCategory::Remote,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BridgeError::ApiError(_) => "Could not reach the group platform".to_string(),
            BridgeError::IoError(e) => format!("File access failed: {}", e),
            BridgeError::SerializationError(_) => {
                "The group platform returned an unexpected response".to_string()
            }
            BridgeError::ConfigError { message } => format!("Configuration problem: {}", message),
            BridgeError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            BridgeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            BridgeError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            BridgeError::InvalidCredential => "The platform session cookie is invalid".to_string(),
            BridgeError::TokenUnavailable => {
                "The platform did not issue an anti-forgery token".to_string()
            }
            BridgeError::UnknownRank { selector } => format!("No rank named '{}'", selector),
            BridgeError::UserNotFound { identifier } => {
                format!("User '{}' was not found", identifier)
            }
            BridgeError::LookupFailed { what, .. } => format!("Could not look up {}", what),
            BridgeError::RemoteRejected { status, .. } => {
                format!("The platform rejected the change (status {})", status)
            }
            BridgeError::Unauthorized => "You are not allowed to do this".to_string(),
            BridgeError::MalformedCommand { reason } => format!("Invalid command: {}", reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the platform endpoints",
            ErrorCategory::Configuration => {
                "Check the command-line flags, environment variables or config file"
            }
            ErrorCategory::Authentication => {
                "Refresh ROBLOX_COOKIE with a new session cookie or check caller roles"
            }
            ErrorCategory::Input => "Check the command arguments and try again",
            ErrorCategory::Remote => {
                "Make sure the bot account has permission to manage this rank"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_display() {
        assert_eq!(RemoteStatus::Code(403).to_string(), "403");
        assert_eq!(RemoteStatus::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            BridgeError::InvalidCredential.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            BridgeError::RemoteRejected {
                status: RemoteStatus::Code(400),
                body: "{}".to_string()
            }
            .category(),
            ErrorCategory::Remote
        );
        assert_eq!(
            BridgeError::MissingConfigError {
                field: "group_id".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }
}
