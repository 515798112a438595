// Feeds serenity message events into the platform-agnostic dispatcher.

use crate::core::commands::{ChatMessage, DispatchOutcome};
use crate::discord::{Data, Error};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

/// A serenity message seen through the `ChatMessage` seam.
pub struct SerenityMessage<'a> {
    ctx: &'a serenity::Context,
    message: &'a serenity::Message,
}

impl<'a> SerenityMessage<'a> {
    pub fn new(ctx: &'a serenity::Context, message: &'a serenity::Message) -> Self {
        Self { ctx, message }
    }
}

#[async_trait]
impl<'a> ChatMessage for SerenityMessage<'a> {
    fn content(&self) -> &str {
        &self.message.content
    }

    fn guild_id(&self) -> Option<u64> {
        self.message.guild_id.map(|id| id.get())
    }

    async fn reply(&self, text: &str) -> anyhow::Result<()> {
        self.message.reply(&self.ctx.http, text).await?;
        Ok(())
    }
}

/// Dispatch one incoming message. Bot authors (including ourselves) are skipped.
pub async fn handle_message(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }

    let outcome = data
        .dispatcher
        .dispatch(&SerenityMessage::new(ctx, message))
        .await?;

    if !matches!(outcome, DispatchOutcome::Ignored(_)) {
        tracing::debug!(
            user_id = message.author.id.get(),
            channel_id = message.channel_id.get(),
            ?outcome,
            "Handled command message"
        );
    }

    Ok(())
}
