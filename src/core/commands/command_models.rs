// Domain models for prefix commands.
//
// A `CommandSource` is the raw, unvalidated shape of a definition (what a
// manifest file or a built-in declares). The registry validates it and turns
// it into an immutable `CommandDefinition` with exactly one bound handler.

use super::dispatcher::Dispatcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// PLATFORM SEAM
// ============================================================================

/// The only capabilities the dispatcher needs from an incoming message.
///
/// The Discord layer wraps serenity messages in this; tests use a mock.
#[async_trait]
pub trait ChatMessage: Send + Sync {
    fn content(&self) -> &str;

    /// `None` for direct messages.
    fn guild_id(&self) -> Option<u64>;

    async fn reply(&self, text: &str) -> anyhow::Result<()>;
}

/// Everything a handler receives when its command is invoked.
pub struct Invocation<'a> {
    pub message: &'a dyn ChatMessage,
    /// Tokens after the command name.
    pub args: Vec<String>,
    /// The full message content after the prefix.
    pub text: String,
    pub prefix: String,
    /// The command name as typed, lowercased.
    pub command: &'a str,
    /// The owning dispatcher, for handlers that manage the registry or overlays.
    pub dispatcher: &'a Dispatcher,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn call(&self, invocation: Invocation<'_>) -> anyhow::Result<()>;
}

/// Named handlers that command manifests can refer to.
#[derive(Default, Clone)]
pub struct HandlerCatalog {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(key).cloned()
    }
}

// ============================================================================
// DEFINITIONS
// ============================================================================

/// A command definition before validation.
///
/// `callback`, `execute` and `run` are the accepted spellings of the handler
/// field. At most one may be set; none at all makes a documentation-only entry.
#[derive(Default, Clone)]
pub struct CommandSource {
    pub name: Option<String>,
    pub commands: Option<Vec<String>>,
    pub aliases: Option<Vec<String>>,
    pub description: Option<String>,
    pub min_args: Option<usize>,
    /// `-1` means unbounded.
    pub max_args: Option<i64>,
    pub expected_args: Option<String>,
    pub syntax_error: Option<String>,
    pub callback: Option<Arc<dyn CommandHandler>>,
    pub execute: Option<Arc<dyn CommandHandler>>,
    pub run: Option<Arc<dyn CommandHandler>>,
}

impl CommandSource {
    pub fn with_callback(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.callback = Some(handler);
        self
    }

    pub fn with_args(mut self, min_args: usize, max_args: i64) -> Self {
        self.min_args = Some(min_args);
        self.max_args = Some(max_args);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_expected_args(mut self, expected_args: impl Into<String>) -> Self {
        self.expected_args = Some(expected_args.into());
        self
    }
}

/// A validated, immutable command.
pub struct CommandDefinition {
    names: Vec<String>,
    min_args: Option<usize>,
    /// `None` means no upper bound.
    max_args: Option<usize>,
    expected_args: Option<String>,
    syntax_error: Option<String>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    pub(crate) fn new(
        names: Vec<String>,
        source: &CommandSource,
        max_args: Option<usize>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            names,
            min_args: source.min_args,
            max_args,
            expected_args: source.expected_args.clone(),
            syntax_error: source.syntax_error.clone(),
            handler,
        }
    }

    /// The first name is the canonical one.
    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn expected_args(&self) -> Option<&str> {
        self.expected_args.as_deref()
    }

    pub fn syntax_error(&self) -> Option<&str> {
        self.syntax_error.as_deref()
    }

    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    /// Does `count` argument tokens satisfy this command's bounds?
    pub fn accepts_arity(&self, count: usize) -> bool {
        let too_few = self.min_args.is_some_and(|min| count < min);
        let too_many = self.max_args.is_some_and(|max| count > max);
        !too_few && !too_many
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("names", &self.names)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

/// One entry of the public command listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub names: Vec<String>,
    pub description: String,
}

impl CommandSummary {
    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.names[1..]
    }
}
