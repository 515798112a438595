// Discord layer - command handlers and event glue.

use crate::core::commands::Dispatcher;
use std::sync::Arc;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "events/message_events.rs"]
pub mod message_events;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Data that's shared with every framework callback.
pub struct Data {
    pub dispatcher: Arc<Dispatcher>,
}
