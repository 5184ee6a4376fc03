mod file_store;
mod in_memory;

pub use file_store::FileColumnPrefsStore;
pub use in_memory::InMemoryColumnPrefsStore;
