use std::sync::Mutex;

use async_trait::async_trait;

use super::base::{parse_record, StoreError, TokenStore};
use crate::models::TokenPair;

/// Keeps the serialized record in memory only. Used when persistence is disabled
/// and in tests.
#[derive(Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seeds the store with a raw value, exactly as if something else had written it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStore {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Seeds the store with a token pair.
    pub fn with_tokens(pair: &TokenPair) -> Result<Self, StoreError> {
        Ok(MemoryStore::with_raw(serde_json::to_string(pair)?))
    }

    /// The raw stored value, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().expect("memory store mutex poisoned").clone()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn load(&self) -> Result<Option<TokenPair>, StoreError> {
        Ok(self.raw().as_deref().and_then(parse_record))
    }

    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let raw = serde_json::to_string(pair)?;
        *self.raw.lock().expect("memory store mutex poisoned") = Some(raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.raw.lock().expect("memory store mutex poisoned").take();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
