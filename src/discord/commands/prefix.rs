use crate::core::commands::{CommandHandler, CommandSource, Invocation};
use async_trait::async_trait;
use std::sync::Arc;

pub const FALLBACK_NAME: &str = "prefix";

/// Show or change this guild's command prefix.
///
/// `!prefix` shows the current one, `!prefix ?` persists `?` for the guild.
pub struct SetPrefix;

#[async_trait]
impl CommandHandler for SetPrefix {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        let message = invocation.message;
        let Some(guild_id) = message.guild_id() else {
            message
                .reply("You cannot change the prefix in private messages")
                .await?;
            return Ok(());
        };

        match invocation.args.first() {
            None => {
                message
                    .reply(&format!(
                        "The prefix for this server is \"{}\"",
                        invocation.prefix
                    ))
                    .await
            }
            Some(new_prefix) => {
                invocation
                    .dispatcher
                    .set_prefix(guild_id, new_prefix)
                    .await?;
                tracing::info!(guild_id, prefix = %new_prefix, "Guild prefix changed");
                message
                    .reply(&format!("The prefix for this server is now \"{}\"", new_prefix))
                    .await
            }
        }
    }
}

pub fn source() -> CommandSource {
    CommandSource::default()
        .with_description("Shows or changes the command prefix for this server")
        .with_args(0, 1)
        .with_expected_args("[new prefix]")
        .with_callback(Arc::new(SetPrefix))
}
