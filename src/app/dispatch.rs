use crate::core::interpreter::CommandInterpreter;
use crate::core::{CallerRef, CommandEnvelope};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub to: CallerRef,
    pub text: String,
}

#[derive(Debug)]
pub struct InboundMessage {
    pub envelope: CommandEnvelope,
    pub reply_to: mpsc::Sender<Reply>,
}

/// Handles each inbound message on its own task until the inbox closes.
///
/// Commands are not coordinated: two commands for the same account race at
/// the platform and the last successful mutation wins.
pub async fn run_dispatcher(
    interpreter: Arc<CommandInterpreter>,
    mut inbox: mpsc::Receiver<InboundMessage>,
) {
    let mut in_flight = JoinSet::new();

    while let Some(message) = inbox.recv().await {
        let interpreter = interpreter.clone();
        in_flight.spawn(async move {
            let Some(text) = interpreter.handle(&message.envelope).await else {
                return;
            };
            let reply = Reply {
                to: message.envelope.caller.clone(),
                text,
            };
            if message.reply_to.send(reply).await.is_err() {
                tracing::warn!("Reply channel for {:?} closed", message.envelope.caller);
            }
        });

        // Reap finished tasks so the set does not grow unbounded.
        while let Some(result) = in_flight.try_join_next() {
            if let Err(e) = result {
                tracing::error!("Command task failed: {}", e);
            }
        }
    }

    while let Some(result) = in_flight.join_next().await {
        if let Err(e) = result {
            tracing::error!("Command task failed: {}", e);
        }
    }
    tracing::info!("Dispatcher stopped, inbox closed");
}
