use super::command_errors::StoreError;
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

/// A persisted "command X is disabled in guild Y" record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisabledCommandRecord {
    pub guild_id: u64,
    pub command: String,
}

impl DisabledCommandRecord {
    pub fn new(guild_id: u64, command: impl Into<String>) -> Self {
        Self {
            guild_id,
            command: command.into(),
        }
    }
}

/// Persistence for disabled commands. Duplicate records are allowed.
#[async_trait]
pub trait DisabledCommandStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<DisabledCommandRecord>, StoreError>;
    async fn insert(&self, record: &DisabledCommandRecord) -> Result<(), StoreError>;
    /// Removes every matching record.
    async fn delete(&self, record: &DisabledCommandRecord) -> Result<(), StoreError>;
}

/// In-memory view of which canonical command names are disabled per guild.
///
/// This is a cache of the store. It is hydrated once at startup; until then
/// nothing is disabled. Writes to the store are the caller's job.
#[derive(Default)]
pub struct DisabledCommands {
    by_guild: DashMap<u64, DashSet<String>>,
}

impl DisabledCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every persisted record. Returns how many records were read.
    pub async fn hydrate(&self, store: &dyn DisabledCommandStore) -> Result<usize, StoreError> {
        let records = store.find_all().await?;
        let count = records.len();
        for record in records {
            self.disable(record.guild_id, &record.command);
        }
        Ok(count)
    }

    /// Returns `true` if the command was not already disabled.
    pub fn disable(&self, guild_id: u64, command: &str) -> bool {
        self.by_guild
            .entry(guild_id)
            .or_default()
            .insert(command.to_string())
    }

    /// Returns `true` if the command was disabled before.
    pub fn enable(&self, guild_id: u64, command: &str) -> bool {
        match self.by_guild.get(&guild_id) {
            Some(commands) => commands.remove(command).is_some(),
            None => false,
        }
    }

    pub fn is_disabled(&self, guild_id: u64, command: &str) -> bool {
        self.by_guild
            .get(&guild_id)
            .is_some_and(|commands| commands.contains(command))
    }

    /// Disabled commands of one guild, sorted.
    pub fn disabled_in(&self, guild_id: u64) -> Vec<String> {
        let mut commands: Vec<String> = self
            .by_guild
            .get(&guild_id)
            .map(|commands| commands.iter().map(|c| c.key().clone()).collect())
            .unwrap_or_default();
        commands.sort();
        commands
    }
}
