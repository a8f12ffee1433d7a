use clap::Parser;
use rank_bridge::app::console::{run_console, ConsoleOperator};
use rank_bridge::app::dispatch::run_dispatcher;
use rank_bridge::app::liveness::{self, LivenessState};
use rank_bridge::core::interpreter::CommandSettings;
use rank_bridge::core::{CallerRef, ConfigProvider};
use rank_bridge::utils::{logger, validation::Validate};
use rank_bridge::{
    BridgeError, CliConfig, CommandInterpreter, PlatformClient, PlatformSettings,
    RankChangeOrchestrator, TomlConfig,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn exit_with(e: &BridgeError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn load_config(cli: CliConfig) -> Result<Box<dyn ConfigProvider>, BridgeError> {
    if let Some(path) = cli.config.as_deref() {
        tracing::info!("Loading configuration from {}", path);
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        return Ok(Box::new(config));
    }

    cli.validate()?;
    Ok(Box::new(cli))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting rank-bridge");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_config(cli).unwrap_or_else(|e| exit_with(&e));
    tracing::info!(
        "✅ Configuration valid, managing group {} with prefix '{}'",
        config.group_id(),
        config.command_prefix()
    );

    let platform = Arc::new(PlatformClient::new(PlatformSettings::from_config(
        config.as_ref(),
    )));
    let interpreter = Arc::new(CommandInterpreter::new(
        RankChangeOrchestrator::from_platform(platform.clone()),
        platform,
        CommandSettings::from_config(config.as_ref()),
    ));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let liveness = tokio::spawn(liveness::serve(listener, LivenessState::new(), async move {
        let _ = stop_rx.await;
    }));

    let (inbox_tx, inbox_rx) = mpsc::channel(64);
    let dispatcher = tokio::spawn(run_dispatcher(interpreter, inbox_rx));

    let operator = ConsoleOperator {
        caller: CallerRef("console".to_string()),
        roles: config.console_roles().to_vec(),
    };
    println!("Type commands, e.g. `{}help`. Ctrl-D or Ctrl-C to exit.", config.command_prefix());

    tokio::select! {
        result = run_console(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), operator, inbox_tx) => {
            if let Err(e) = result {
                tracing::error!("Console gateway failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, shutting down");
        }
    }

    let _ = stop_tx.send(());
    if let Err(e) = dispatcher.await {
        tracing::error!("Dispatcher task failed: {}", e);
    }
    match liveness.await {
        Ok(Err(e)) => tracing::error!("Liveness endpoint failed: {}", e),
        Err(e) => tracing::error!("Liveness task failed: {}", e),
        Ok(Ok(())) => {}
    }

    tracing::info!("✅ rank-bridge stopped");
    Ok(())
}
