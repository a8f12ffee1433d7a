pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{PlatformClient, PlatformSettings};
pub use config::toml_config::TomlConfig;
pub use core::{interpreter::CommandInterpreter, orchestrator::RankChangeOrchestrator};
pub use utils::error::{BridgeError, Result};
