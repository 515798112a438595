// The dispatcher turns one incoming message into at most one handler call.
//
// Per message:
//   prefix match -> tokenize -> lookup -> disabled check -> arity check -> invoke
// Every failed predicate ends the run. Only the disabled and arity checks
// reply to the user; the rest are silent.
//
// The dispatcher is the owning context for the registry, the prefix table and
// the disabled overlay. Handlers get a reference to it through `Invocation`.

use super::command_errors::StoreError;
use super::command_models::{ChatMessage, Invocation};
use super::command_registry::CommandRegistry;
use super::disabled_commands::{DisabledCommandRecord, DisabledCommandStore, DisabledCommands};
use super::dispatch_config::{render_syntax_error, DispatchConfig};
use super::prefixes::{GuildPrefixRecord, PrefixStore, PrefixTable};
use std::sync::Arc;

/// Why a message was not treated as a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoPrefix,
    EmptyCommand,
    UnknownCommand,
}

/// Where the per-message state machine stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Disabled { command: String },
    SyntaxError { command: String },
    Invoked { command: String },
    /// The handler returned an error; it was logged and swallowed.
    HandlerFailed { command: String },
}

pub struct Dispatcher {
    config: DispatchConfig,
    registry: CommandRegistry,
    prefixes: PrefixTable,
    disabled: DisabledCommands,
    disabled_store: Arc<dyn DisabledCommandStore>,
    prefix_store: Arc<dyn PrefixStore>,
}

impl Dispatcher {
    pub fn new(
        config: DispatchConfig,
        registry: CommandRegistry,
        disabled_store: Arc<dyn DisabledCommandStore>,
        prefix_store: Arc<dyn PrefixStore>,
    ) -> Self {
        let prefixes = PrefixTable::new(config.default_prefix());
        Self {
            config,
            registry,
            prefixes,
            disabled: DisabledCommands::new(),
            disabled_store,
            prefix_store,
        }
    }

    /// Load persisted prefixes and disabled commands.
    ///
    /// Messages may be dispatched while this runs; until it finishes they see
    /// default prefixes and nothing disabled.
    pub async fn hydrate(&self) -> Result<(), StoreError> {
        let prefixes = self.prefixes.hydrate(self.prefix_store.as_ref()).await?;
        let disabled = self.disabled.hydrate(self.disabled_store.as_ref()).await?;
        tracing::info!(prefixes, disabled, "Hydrated guild command settings");
        Ok(())
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn disabled_commands(&self) -> &DisabledCommands {
        &self.disabled
    }

    pub fn prefix_for(&self, guild_id: Option<u64>) -> String {
        self.prefixes.resolve(guild_id)
    }

    /// Persist a guild prefix, then apply it.
    pub async fn set_prefix(&self, guild_id: u64, prefix: &str) -> Result<(), StoreError> {
        self.prefix_store
            .save_prefix(&GuildPrefixRecord {
                guild_id,
                prefix: prefix.to_string(),
            })
            .await?;
        self.prefixes.set(Some(guild_id), prefix);
        Ok(())
    }

    /// Persist the disable record, then update the overlay.
    pub async fn disable_command(&self, guild_id: u64, command: &str) -> Result<(), StoreError> {
        self.disabled_store
            .insert(&DisabledCommandRecord::new(guild_id, command))
            .await?;
        self.disabled.disable(guild_id, command);
        Ok(())
    }

    /// Delete the disable record, then update the overlay.
    pub async fn enable_command(&self, guild_id: u64, command: &str) -> Result<(), StoreError> {
        self.disabled_store
            .delete(&DisabledCommandRecord::new(guild_id, command))
            .await?;
        self.disabled.enable(guild_id, command);
        Ok(())
    }

    /// Run one message through the dispatch pipeline.
    ///
    /// Errors are reply failures only. Handler errors are logged and reported
    /// as `DispatchOutcome::HandlerFailed`.
    pub async fn dispatch(&self, message: &dyn ChatMessage) -> anyhow::Result<DispatchOutcome> {
        let guild_id = message.guild_id();
        let prefix = self.prefixes.resolve(guild_id);

        let Some(text) = message.content().strip_prefix(prefix.as_str()) else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::NoPrefix));
        };

        let mut tokens = self.config.tokenizer().split(text).into_iter();
        let name = match tokens.next() {
            Some(first) if !first.is_empty() => first.to_lowercase(),
            _ => return Ok(DispatchOutcome::Ignored(IgnoreReason::EmptyCommand)),
        };

        let Some(definition) = self.registry.get(&name).cloned() else {
            return Ok(DispatchOutcome::Ignored(IgnoreReason::UnknownCommand));
        };
        let canonical = definition.canonical_name().to_string();

        if let Some(guild_id) = guild_id {
            if self.disabled.is_disabled(guild_id, &canonical) {
                tracing::debug!(guild_id, command = %canonical, "Command is disabled");
                message.reply(self.config.disabled_notice()).await?;
                return Ok(DispatchOutcome::Disabled { command: canonical });
            }
        }

        let args: Vec<String> = tokens.map(str::to_string).collect();

        if !definition.accepts_arity(args.len()) {
            let template = definition
                .syntax_error()
                .unwrap_or_else(|| self.config.syntax_error());
            let reply = render_syntax_error(template, &prefix, &name, definition.expected_args());
            message.reply(&reply).await?;
            return Ok(DispatchOutcome::SyntaxError { command: canonical });
        }

        tracing::debug!(?guild_id, command = %canonical, args = args.len(), "Invoking command");

        let invocation = Invocation {
            message,
            args,
            text: text.to_string(),
            prefix,
            command: &name,
            dispatcher: self,
        };

        match definition.handler().call(invocation).await {
            Ok(()) => Ok(DispatchOutcome::Invoked { command: canonical }),
            Err(e) => {
                tracing::error!(command = %canonical, "Command handler failed: {:#}", e);
                Ok(DispatchOutcome::HandlerFailed { command: canonical })
            }
        }
    }
}
