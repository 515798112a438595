use super::command_errors::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildPrefixRecord {
    pub guild_id: u64,
    pub prefix: String,
}

#[async_trait]
pub trait PrefixStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<GuildPrefixRecord>, StoreError>;
    /// Insert or overwrite the prefix of one guild.
    async fn save_prefix(&self, record: &GuildPrefixRecord) -> Result<(), StoreError>;
}

/// Per-guild prefix overrides on top of a process-wide default.
pub struct PrefixTable {
    default_prefix: String,
    by_guild: DashMap<u64, String>,
}

impl PrefixTable {
    pub fn new(default_prefix: impl Into<String>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
            by_guild: DashMap::new(),
        }
    }

    pub async fn hydrate(&self, store: &dyn PrefixStore) -> Result<usize, StoreError> {
        let records = store.find_all().await?;
        let count = records.len();
        for record in records {
            self.by_guild.insert(record.guild_id, record.prefix);
        }
        Ok(count)
    }

    /// Never fails: no guild, no entry, or an empty entry all give the default.
    pub fn resolve(&self, guild_id: Option<u64>) -> String {
        guild_id
            .and_then(|id| self.by_guild.get(&id).map(|prefix| prefix.clone()))
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| self.default_prefix.clone())
    }

    /// Setting a prefix outside a guild does nothing.
    pub fn set(&self, guild_id: Option<u64>, prefix: &str) {
        if let Some(id) = guild_id {
            self.by_guild.insert(id, prefix.to_string());
        }
    }
}
