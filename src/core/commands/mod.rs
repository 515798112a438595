// Core command module - the registry and dispatch engine.
// Nothing in here knows about Discord; messages arrive through the
// `ChatMessage` trait and persistence goes through the store traits.

pub mod command_errors;
pub mod command_models;
pub mod command_registry;
pub mod disabled_commands;
pub mod dispatch_config;
pub mod dispatcher;
pub mod prefixes;

#[cfg(test)]
pub mod testing;

pub use command_errors::{RegistryError, StoreError};
pub use command_models::{
    ChatMessage, CommandHandler, CommandSource, CommandSummary, HandlerCatalog, Invocation,
};
pub use command_registry::CommandRegistry;
pub use disabled_commands::{DisabledCommandRecord, DisabledCommandStore};
pub use dispatch_config::{DispatchConfig, Tokenizer};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use prefixes::{GuildPrefixRecord, PrefixStore};
