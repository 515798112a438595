// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "commands/mod.rs"]
pub mod commands;
