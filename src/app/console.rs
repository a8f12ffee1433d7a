use crate::app::dispatch::{InboundMessage, Reply};
use crate::core::{CallerRef, CommandEnvelope};
use crate::utils::error::{BridgeError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// The local operator typing commands into the console.
#[derive(Debug, Clone)]
pub struct ConsoleOperator {
    pub caller: CallerRef,
    pub roles: Vec<String>,
}

/// Feeds each input line to the dispatcher and writes replies as they arrive.
/// Returns once input is exhausted and every pending reply has been written.
pub async fn run_console<R, W>(
    input: R,
    mut output: W,
    operator: ConsoleOperator,
    inbox: mpsc::Sender<InboundMessage>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (reply_tx, mut reply_rx) = mpsc::channel::<Reply>(32);
    let mut reply_tx = Some(reply_tx);
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if reply_tx.is_some() => {
                let Some(line) = line? else {
                    reply_tx = None;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let Some(reply_to) = reply_tx.clone() else { continue };
                let message = InboundMessage {
                    envelope: CommandEnvelope {
                        content: line,
                        author_is_bot: false,
                        caller: operator.caller.clone(),
                        caller_roles: operator.roles.clone(),
                    },
                    reply_to,
                };
                inbox.send(message).await.map_err(|_| BridgeError::ConfigError {
                    message: "dispatcher is not running".to_string(),
                })?;
            }
            reply = reply_rx.recv() => {
                let Some(reply) = reply else { break };
                output.write_all(reply.text.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        }
    }

    Ok(())
}
