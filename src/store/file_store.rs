use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, warn};

use super::base::{parse_record, StoreError, TokenStore, STORAGE_KEY};
use crate::models::TokenPair;

/// Config for the file-backed store.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        FileStoreConfig {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".quizgate/storage.json")
}

/// A key/value JSON file with string values, laid out the way browser local
/// storage is: `{"auth-tokens": "{\"token\":...,\"refreshToken\":...}"}`.
///
/// Only [`STORAGE_KEY`] is ever written by us; other keys are carried along untouched.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(config: &FileStoreConfig) -> Self {
        FileStore {
            path: config.path.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    async fn read_entries(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                warn!(
                    event_name = "store.file.unparseable",
                    event_domain = "store",
                    path = %self.path.display(),
                    "storage file is not a JSON object, treating it as empty: {}",
                    e
                );
                Ok(Some(Map::new()))
            }
        }
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).await.map_err(|e| self.io_error(e))?;
        restrict_permissions(&tmp)
            .await
            .map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl TokenStore for FileStore {
    async fn load(&self) -> Result<Option<TokenPair>, StoreError> {
        let Some(entries) = self.read_entries().await? else {
            debug!("No storage file at '{}'", self.path.display());
            return Ok(None);
        };

        match entries.get(STORAGE_KEY) {
            Some(Value::String(raw)) => Ok(parse_record(raw)),
            Some(other) => {
                warn!(
                    "Storage key '{}' holds a non-string value ({}), ignoring it",
                    STORAGE_KEY,
                    other
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let mut entries = self.read_entries().await?.unwrap_or_default();
        entries.insert(
            STORAGE_KEY.to_string(),
            Value::String(serde_json::to_string(pair)?),
        );
        self.write_entries(&entries).await?;
        debug!("Saved token pair to '{}'", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let Some(mut entries) = self.read_entries().await? else {
            return Ok(());
        };
        entries.remove(STORAGE_KEY);

        if entries.is_empty() {
            match fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(self.io_error(e)),
            }
        } else {
            self.write_entries(&entries).await?;
        }
        debug!("Cleared token pair from '{}'", self.path.display());
        Ok(())
    }
}
