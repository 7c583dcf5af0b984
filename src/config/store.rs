use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::file_store::FileStoreConfig;

/// A wrapper for the token store configuration:
/// - enabled: if false, tokens only live in memory for the lifetime of the process.
/// - backend: the actual persistent backend (file, etc.).
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StoreConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: Some(StoreBackend::File(FileStoreConfig::default())),
        }
    }
}

/// The existing store backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "file")]
    File(FileStoreConfig),
    #[serde(rename = "memory")]
    Memory,
}
