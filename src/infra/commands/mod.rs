// Implementations of the command store traits plus the manifest loader.

pub mod definition_loader;
pub mod in_memory;
pub mod sqlite_store;
pub mod store_backend;

pub use in_memory::InMemoryCommandStore;
pub use sqlite_store::SqliteCommandStore;
pub use store_backend::StoreBackend;
