//! CLI channel — stdin/stdout chat with the intake assistant.
//!
//! Input runs in lockstep with the session: the next message is read only
//! after the previous turn has ended. Free-form answers (resume, addendum)
//! are gathered line by line until an empty line, so pasted text arrives as
//! one message.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedSender;

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse};
use crate::error::ChannelError;

/// Shared between the channel and its stdin reader task.
#[derive(Default)]
struct InputState {
    long_form: AtomicBool,
    turn_done: Notify,
}

/// Reads applicant messages from stdin and prints replies to stdout.
pub struct CliChannel {
    input: Arc<InputState>,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            input: Arc::new(InputState::default()),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let input = Arc::clone(&self.input);

        tokio::spawn(async move {
            eprint!("> ");
            read_messages(BufReader::new(tokio::io::stdin()), input, tx).await;
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        println!("\n{}", response.content);
        Ok(())
    }

    async fn expect_long_form(&self, long_form: bool) -> Result<(), ChannelError> {
        self.input.long_form.store(long_form, Ordering::SeqCst);
        Ok(())
    }

    async fn end_turn(&self) -> Result<(), ChannelError> {
        if self.input.long_form.load(Ordering::SeqCst) {
            eprint!("\n(finish with an empty line)\n> ");
        } else {
            eprint!("\n> ");
        }
        self.input.turn_done.notify_one();
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        eprintln!("\nGoodbye!");
        Ok(())
    }
}

/// Turn input lines into messages, one turn at a time.
///
/// In short-form mode each non-blank line is a message. In long-form mode
/// lines are collected until an empty line and sent joined with `\n`. EOF
/// flushes whatever has been collected.
async fn read_messages<R>(
    reader: R,
    input: Arc<InputState>,
    tx: UnboundedSender<IncomingMessage>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut block: Vec<String> = Vec::new();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        };

        let content = if input.long_form.load(Ordering::SeqCst) {
            if !line.trim().is_empty() {
                block.push(line.trim_end().to_string());
                continue;
            }
            if block.is_empty() {
                continue;
            }
            std::mem::take(&mut block).join("\n")
        } else {
            let line = line.trim();
            if line.is_empty() {
                eprint!("> ");
                continue;
            }
            line.to_string()
        };

        if tx.send(IncomingMessage::new("cli", "local-user", &content)).is_err() {
            return;
        }
        input.turn_done.notified().await;
    }

    if !block.is_empty() {
        let _ = tx.send(IncomingMessage::new("cli", "local-user", &block.join("\n")));
    }
}
