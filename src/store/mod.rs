pub mod base;
pub mod file_store;
pub mod memory_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{TokenStore, create_store};"
pub use base::{create_store, StoreError, TokenStore, STORAGE_KEY};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
