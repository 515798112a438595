// In-memory implementation of the command stores.
// Used by the tests, and handy when running without a database.

use crate::core::commands::{
    DisabledCommandRecord, DisabledCommandStore, GuildPrefixRecord, PrefixStore, StoreError,
};
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryCommandStore {
    /// guild_id -> disabled command names, duplicates kept like a real table would
    disabled: DashMap<u64, Vec<String>>,
    prefixes: DashMap<u64, String>,
}

impl InMemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DisabledCommandStore for InMemoryCommandStore {
    async fn find_all(&self) -> Result<Vec<DisabledCommandRecord>, StoreError> {
        let mut records: Vec<DisabledCommandRecord> = self
            .disabled
            .iter()
            .flat_map(|entry| {
                let guild_id = *entry.key();
                entry
                    .value()
                    .iter()
                    .map(|command| DisabledCommandRecord::new(guild_id, command.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        records.sort_by(|a, b| (a.guild_id, &a.command).cmp(&(b.guild_id, &b.command)));
        Ok(records)
    }

    async fn insert(&self, record: &DisabledCommandRecord) -> Result<(), StoreError> {
        self.disabled
            .entry(record.guild_id)
            .or_default()
            .push(record.command.clone());
        Ok(())
    }

    async fn delete(&self, record: &DisabledCommandRecord) -> Result<(), StoreError> {
        if let Some(mut commands) = self.disabled.get_mut(&record.guild_id) {
            commands.retain(|command| command != &record.command);
        }
        Ok(())
    }
}

#[async_trait]
impl PrefixStore for InMemoryCommandStore {
    async fn find_all(&self) -> Result<Vec<GuildPrefixRecord>, StoreError> {
        Ok(self
            .prefixes
            .iter()
            .map(|entry| GuildPrefixRecord {
                guild_id: *entry.key(),
                prefix: entry.value().clone(),
            })
            .collect())
    }

    async fn save_prefix(&self, record: &GuildPrefixRecord) -> Result<(), StoreError> {
        self.prefixes.insert(record.guild_id, record.prefix.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_records() {
        let store = InMemoryCommandStore::new();
        let ping = DisabledCommandRecord::new(1, "ping");

        store.insert(&ping).await.unwrap();
        store.insert(&ping).await.unwrap();
        store.insert(&DisabledCommandRecord::new(1, "echo")).await.unwrap();

        let all = DisabledCommandStore::find_all(&store).await.unwrap();
        assert_eq!(all.len(), 3);

        // Delete removes every matching record
        store.delete(&ping).await.unwrap();
        let all = DisabledCommandStore::find_all(&store).await.unwrap();
        assert_eq!(all, vec![DisabledCommandRecord::new(1, "echo")]);
    }

    #[tokio::test]
    async fn test_prefix_overwrite() {
        let store = InMemoryCommandStore::new();
        for prefix in ["?", "$"] {
            store
                .save_prefix(&GuildPrefixRecord {
                    guild_id: 9,
                    prefix: prefix.to_string(),
                })
                .await
                .unwrap();
        }

        let all = PrefixStore::find_all(&store).await.unwrap();
        assert_eq!(
            all,
            vec![GuildPrefixRecord {
                guild_id: 9,
                prefix: "$".into()
            }]
        );
    }
}
