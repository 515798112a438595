// Built-in `command` command: enable or disable another command in this guild.
//
//   !command disable ping
//   !command enable p        (any alias works)
//
// The store is written before the in-memory overlay, via the dispatcher.

use crate::core::commands::{CommandHandler, CommandSource, Invocation};
use async_trait::async_trait;
use std::sync::Arc;

/// Registered under the fallback name `command`.
pub const FALLBACK_NAME: &str = "command";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Enable,
    Disable,
}

pub struct CommandToggle;

#[async_trait]
impl CommandHandler for CommandToggle {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        let message = invocation.message;
        let mut args = invocation.args.iter().map(|arg| arg.to_lowercase());
        let new_state = args.next();
        let name = args.next().unwrap_or_default();

        let toggle = match new_state.as_deref() {
            Some("enable") => Toggle::Enable,
            Some("disable") => Toggle::Disable,
            _ => {
                message
                    .reply("The state must either be \"enable\" or \"disable\"")
                    .await?;
                return Ok(());
            }
        };

        let Some(guild_id) = message.guild_id() else {
            message
                .reply("You cannot enable or disable commands in private messages")
                .await?;
            return Ok(());
        };

        let dispatcher = invocation.dispatcher;
        let Some(target) = dispatcher.registry().find_public(&name) else {
            message
                .reply(&format!(
                    "Could not find command \"{}\"! View all commands with \"{}help\"",
                    name,
                    dispatcher.prefix_for(Some(guild_id))
                ))
                .await?;
            return Ok(());
        };

        let main_command = target.canonical_name();
        let is_disabled = dispatcher
            .disabled_commands()
            .is_disabled(guild_id, main_command);

        match toggle {
            Toggle::Enable if !is_disabled => {
                message.reply("That command is already enabled!").await?;
            }
            Toggle::Enable => {
                dispatcher.enable_command(guild_id, main_command).await?;
                tracing::info!(guild_id, command = main_command, "Command enabled");
                message
                    .reply(&format!("\"{}\" is now enabled!", main_command))
                    .await?;
            }
            Toggle::Disable if is_disabled => {
                message.reply("That command is already disabled!").await?;
            }
            Toggle::Disable => {
                dispatcher.disable_command(guild_id, main_command).await?;
                tracing::info!(guild_id, command = main_command, "Command disabled");
                message
                    .reply(&format!("\"{}\" is now disabled!", main_command))
                    .await?;
            }
        }

        Ok(())
    }
}

pub fn source() -> CommandSource {
    CommandSource::default()
        .with_description("Enables or disables a command for this server")
        .with_args(2, 2)
        .with_expected_args("<\"enable\" or \"disable\"> <Command Name>")
        .with_callback(Arc::new(CommandToggle))
}
