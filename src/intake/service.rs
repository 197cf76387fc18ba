//! IntakeService — owns the live session and feeds channel messages through it.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::channels::{Channel, OutgoingResponse};
use crate::error::ChannelError;

use super::controller::{IntakeController, IntakeStatus, Turn};

/// Serializes access to the single intake session.
///
/// A turn holds the lock until it is fully resolved, synthesis included, so
/// messages from several channels are processed strictly one at a time.
pub struct IntakeService {
    controller: Mutex<IntakeController>,
}

impl IntakeService {
    pub fn new(controller: IntakeController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }

    /// Run one applicant message through the controller.
    pub async fn handle(&self, message: &str) -> Turn {
        let mut controller = self.controller.lock().await;
        controller.advance(message).await
    }

    pub async fn status(&self) -> IntakeStatus {
        self.controller.lock().await.status()
    }

    /// Reset the session and return the opening turn.
    pub async fn reset(&self) -> Turn {
        self.handle("restart").await
    }

    /// Consume a channel's message stream until it ends, replying to each
    /// message with every output of its turn.
    pub async fn run_channel(&self, channel: &dyn Channel) -> Result<(), ChannelError> {
        let mut stream = channel.start().await?;
        info!(channel = channel.name(), "Channel started");

        while let Some(msg) = stream.next().await {
            let turn = self.handle(&msg.content).await;
            for text in turn.messages {
                if let Err(e) = channel.respond(&msg, OutgoingResponse::text(text)).await {
                    warn!(channel = channel.name(), error = %e, "Failed to deliver reply");
                }
            }
            channel.expect_long_form(turn.stage.accepts_long_form()).await?;
            channel.end_turn().await?;
        }

        info!(channel = channel.name(), "Channel closed");
        channel.shutdown().await
    }
}

pub type SharedIntakeService = Arc<IntakeService>;
