// Discord commands module.
// Built-in commands register in code; application commands come from the
// manifests in the commands directory and point at handlers listed here.

pub mod basic;
pub mod command_toggle;
pub mod help;
pub mod prefix;

use crate::core::commands::{CommandSource, HandlerCatalog};
use std::sync::Arc;

/// Built-in commands paired with the fallback name they register under.
pub fn builtin_sources() -> Vec<(CommandSource, String)> {
    vec![
        (command_toggle::source(), command_toggle::FALLBACK_NAME.to_string()),
        (help::source(), help::FALLBACK_NAME.to_string()),
        (prefix::source(), prefix::FALLBACK_NAME.to_string()),
    ]
}

/// Handlers that command manifests may reference by key.
pub fn handler_catalog() -> HandlerCatalog {
    let mut catalog = HandlerCatalog::new();
    catalog.insert("ping", Arc::new(basic::Ping));
    catalog.insert("echo", Arc::new(basic::Echo));
    catalog
}
