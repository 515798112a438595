// Picks where per-guild prefixes and disabled commands are kept.
//
// COMMAND_STORE=memory keeps them in process (lost on restart). Anything else,
// including unset, uses `<DATA_DIR>/commands.db`.

use super::{InMemoryCommandStore, SqliteCommandStore};
use crate::core::commands::{DisabledCommandStore, PrefixStore};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { database_path: String },
    Memory,
}

impl StoreBackend {
    pub fn from_setting(setting: Option<&str>, data_dir: &str) -> Self {
        match setting.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
            _ => StoreBackend::Sqlite {
                database_path: Path::new(data_dir)
                    .join("commands.db")
                    .to_string_lossy()
                    .into_owned(),
            },
        }
    }

    /// Open the backend. One store serves both traits.
    pub async fn open(
        &self,
    ) -> anyhow::Result<(Arc<dyn DisabledCommandStore>, Arc<dyn PrefixStore>)> {
        match self {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory command store; settings are lost on restart");
                let store = Arc::new(InMemoryCommandStore::new());
                let disabled: Arc<dyn DisabledCommandStore> = store.clone();
                let prefixes: Arc<dyn PrefixStore> = store;
                Ok((disabled, prefixes))
            }
            StoreBackend::Sqlite { database_path } => {
                let store = Arc::new(SqliteCommandStore::connect(database_path).await?);
                tracing::info!(path = %database_path, "Opened SQLite command store");
                let disabled: Arc<dyn DisabledCommandStore> = store.clone();
                let prefixes: Arc<dyn PrefixStore> = store;
                Ok((disabled, prefixes))
            }
        }
    }
}
