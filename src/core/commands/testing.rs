// Test doubles shared by the command tests.

use super::command_models::{ChatMessage, CommandHandler, CommandSource, Invocation};
use super::command_registry::CommandRegistry;
use super::dispatch_config::DispatchConfig;
use super::dispatcher::Dispatcher;
use crate::infra::commands::InMemoryCommandStore;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A message that records every reply sent to it.
pub struct MockMessage {
    content: String,
    guild_id: Option<u64>,
    replies: Mutex<Vec<String>>,
}

impl MockMessage {
    pub fn in_guild(guild_id: u64, content: &str) -> Self {
        Self {
            content: content.to_string(),
            guild_id: Some(guild_id),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn direct(content: &str) -> Self {
        Self {
            content: content.to_string(),
            guild_id: None,
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatMessage for MockMessage {
    fn content(&self) -> &str {
        &self.content
    }

    fn guild_id(&self) -> Option<u64> {
        self.guild_id
    }

    async fn reply(&self, text: &str) -> anyhow::Result<()> {
        self.replies.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// What a `RecordingHandler` saw of one invocation.
#[derive(Debug, Clone)]
pub struct SeenInvocation {
    pub args: Vec<String>,
    pub text: String,
    pub prefix: String,
    pub command: String,
}

#[derive(Default)]
pub struct RecordingHandler {
    seen: Mutex<Vec<SeenInvocation>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|seen| seen.args.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_invocation(&self) -> Option<SeenInvocation> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(SeenInvocation {
            args: invocation.args,
            text: invocation.text,
            prefix: invocation.prefix,
            command: invocation.command.to_string(),
        });
        Ok(())
    }
}

pub struct FailingHandler;

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn call(&self, _invocation: Invocation<'_>) -> anyhow::Result<()> {
        anyhow::bail!("handler exploded")
    }
}

/// Build a dispatcher over a fresh in-memory store with `sources` registered
/// (each under its own `name`).
pub fn dispatcher_with(
    config: DispatchConfig,
    sources: Vec<CommandSource>,
) -> (Dispatcher, Arc<InMemoryCommandStore>) {
    let mut registry = CommandRegistry::new();
    for source in sources {
        let fallback = source.name.clone().unwrap_or_default();
        registry.register(source, &fallback).unwrap();
    }

    let store = Arc::new(InMemoryCommandStore::new());
    let dispatcher = Dispatcher::new(config, registry, store.clone(), store.clone());
    (dispatcher, store)
}
