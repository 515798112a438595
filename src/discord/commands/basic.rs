// Small application commands referenced by the manifests in `commands/`.

use crate::core::commands::{CommandHandler, Invocation};
use async_trait::async_trait;

pub struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        invocation.message.reply("Pong!").await
    }
}

/// Repeats the arguments back.
pub struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        invocation.message.reply(&invocation.args.join(" ")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{dispatcher_with, MockMessage};
    use crate::core::commands::{CommandSource, DispatchConfig};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ping_and_echo() {
        let ping = CommandSource {
            name: Some("ping".into()),
            ..Default::default()
        }
        .with_callback(Arc::new(Ping));
        let echo = CommandSource {
            name: Some("echo".into()),
            ..Default::default()
        }
        .with_args(1, -1)
        .with_callback(Arc::new(Echo));
        let (dispatcher, _) = dispatcher_with(DispatchConfig::default(), vec![ping, echo]);

        let msg = MockMessage::in_guild(1, "!PING");
        dispatcher.dispatch(&msg).await.unwrap();
        assert_eq!(msg.replies(), vec!["Pong!".to_string()]);

        let msg = MockMessage::in_guild(1, "!echo hello  there");
        dispatcher.dispatch(&msg).await.unwrap();
        assert_eq!(msg.replies(), vec!["hello there".to_string()]);
    }
}
