use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::models::TokenPair;

/// The single key the token pair lives under.
pub const STORAGE_KEY: &str = "auth-tokens";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The TokenStore trait abstracts where the token pair is persisted (load, save, clear).
///
/// A missing or unparseable record is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<TokenPair>, StoreError>;
    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
    fn is_persistent(&self) -> bool {
        // Real stores survive a restart; the memory store overrides this
        true
    }
}

/// Decodes a raw stored value, treating garbage as "no tokens".
pub(crate) fn parse_record(raw: &str) -> Option<TokenPair> {
    match serde_json::from_str::<TokenPair>(raw) {
        Ok(pair) => Some(pair),
        Err(e) => {
            warn!(
                event_name = "store.record.unparseable",
                event_domain = "store",
                key = STORAGE_KEY,
                "ignoring stored token record: {}",
                e
            );
            None
        }
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.enabled = false` (or the backend is `memory`), tokens only live in memory.
pub fn create_store(config: &StoreConfig) -> Arc<dyn TokenStore> {
    if !config.enabled {
        info!("Token store is disabled. Using in-memory store.");
        return Arc::new(MemoryStore::new());
    }

    match &config.backend {
        Some(StoreBackend::File(file_config)) => {
            info!(
                "Using file token store at '{}'",
                file_config.path.display()
            );
            Arc::new(FileStore::new(file_config))
        }
        Some(StoreBackend::Memory) => {
            info!("Using in-memory token store.");
            Arc::new(MemoryStore::new())
        }
        None => {
            warn!("Store is enabled but no backend is configured; falling back to in-memory store.");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::file_store::FileStoreConfig;

    #[test]
    fn test_parse_record() {
        assert_eq!(
            parse_record(r#"{"token":"a","refreshToken":"b"}"#),
            Some(TokenPair::new("a", "b"))
        );
        assert_eq!(parse_record("not json"), None);
        assert_eq!(parse_record(r#"{"token":"a"}"#), None);
        assert_eq!(parse_record("null"), None);
    }

    #[test]
    fn test_create_store_disabled_is_memory() {
        let store = create_store(&StoreConfig {
            enabled: false,
            backend: Some(StoreBackend::File(FileStoreConfig::default())),
        });
        assert!(!store.is_persistent());
    }

    #[test]
    fn test_create_store_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_store(&StoreConfig {
            enabled: true,
            backend: Some(StoreBackend::File(FileStoreConfig {
                path: dir.path().join("storage.json"),
            })),
        });
        assert!(store.is_persistent());
    }
}
