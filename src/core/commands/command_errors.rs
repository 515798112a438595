use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and registering command definitions.
///
/// All of these are fatal: they surface during startup, before the bot
/// connects, so a broken command directory never serves traffic.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Command \"{origin}\" can have \"callback\", \"execute\" or \"run\", but only one of them")]
    AmbiguousHandler { origin: String },

    #[error("Command \"{origin}\" does not have a name, commands array or aliases array set")]
    MissingName { origin: String },

    #[error("Name \"{name}\" of command \"{command}\" is already used by command \"{existing}\"")]
    DuplicateName {
        name: String,
        command: String,
        existing: String,
    },

    #[error("Command \"{origin}\" references unknown handler \"{handler}\"")]
    UnknownHandler { origin: String, handler: String },

    #[error("Command \"{origin}\" has invalid argument bounds: {reason}")]
    InvalidArity { origin: String, reason: String },

    #[error("Commands directory {0:?} doesn't exist")]
    MissingDirectory(PathBuf),

    #[error("Failed to read {path:?}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {error}")]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

/// Errors from the persistence collaborators (disabled commands, prefixes).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Backend(String),
}
