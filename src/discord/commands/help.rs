use crate::core::commands::{CommandHandler, CommandSource, CommandSummary, Invocation};
use async_trait::async_trait;
use std::sync::Arc;

pub const FALLBACK_NAME: &str = "help";

/// Lists every public command with its aliases and description.
pub struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        let dispatcher = invocation.dispatcher;
        let disabled = invocation
            .message
            .guild_id()
            .map(|guild_id| dispatcher.disabled_commands().disabled_in(guild_id))
            .unwrap_or_default();

        let lines: Vec<String> = dispatcher
            .registry()
            .list_public()
            .iter()
            .map(|entry| format_entry(entry, &invocation.prefix, &disabled))
            .collect();

        let reply = if lines.is_empty() {
            "No commands are registered.".to_string()
        } else {
            format!("**Commands**\n{}", lines.join("\n"))
        };
        invocation.message.reply(&reply).await
    }
}

fn format_entry(entry: &CommandSummary, prefix: &str, disabled: &[String]) -> String {
    let mut line = format!("`{}{}`", prefix, entry.canonical_name());

    if !entry.aliases().is_empty() {
        line.push_str(&format!(" (aliases: {})", entry.aliases().join(", ")));
    }
    if !entry.description.is_empty() {
        line.push_str(&format!(" - {}", entry.description));
    }
    if disabled.iter().any(|name| name == entry.canonical_name()) {
        line.push_str(" *(disabled)*");
    }

    line
}

pub fn source() -> CommandSource {
    CommandSource::default()
        .with_description("Lists all available commands")
        .with_args(0, 0)
        .with_callback(Arc::new(Help))
}
