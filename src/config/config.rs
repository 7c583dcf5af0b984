use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// Host the quiz front end talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fin-proj-gr7.herokuapp.com";

/// Prefix for environment overrides, e.g. `QUIZGATE_API__BASE_URL`.
pub const ENV_PREFIX: &str = "QUIZGATE_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend API, token store, routing and logging.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the quiz backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No timeout when unset.
    pub timeout_in_ms: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_in_ms.map(Duration::from_millis)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_in_ms: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Routing knobs used by the route guard.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RoutesConfig {
    #[serde(default = "default_redirect")]
    pub redirect_to: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            redirect_to: default_redirect(),
        }
    }
}

fn default_redirect() -> String {
    "/".to_string()
}

/// Builds the figment for a YAML file plus `QUIZGATE_` environment overrides.
/// A missing file is fine: every section has defaults.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Extracts a versioned config out of an already assembled figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from a YAML file (usually `./config.yaml`).
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    extract_config(figment_for(path))
}

/// Render the JSON schema for the configuration.
pub fn schema_json() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    fn parse(yaml: &str) -> Result<ConfigV1, figment::Error> {
        extract_config(Figment::new().merge(Yaml::string(yaml)))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(r#"version: "1.0.0""#).expect("minimal config should parse");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.timeout().is_none());
        assert_eq!(config.routes.redirect_to, "/");
        assert!(config.store.enabled);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
version: "1.0.0"
api:
  base_url: http://localhost:4000
  timeout_in_ms: 2500
store:
  enabled: true
  type: file
  path: /tmp/quizgate/storage.json
routes:
  redirect_to: /login
logging:
  level: debug
  format: json
"#,
        )
        .expect("full config should parse");

        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.api.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.routes.redirect_to, "/login");
        match config.store.backend {
            Some(StoreBackend::File(file)) => {
                assert_eq!(file.path.to_str(), Some("/tmp/quizgate/storage.json"))
            }
            other => panic!("expected file backend, got {:?}", other),
        }
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_memory_backend() {
        let config = parse(
            r#"
version: "1.0.0"
store:
  enabled: true
  type: memory
"#,
        )
        .unwrap();
        assert!(matches!(config.store.backend, Some(StoreBackend::Memory)));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        assert!(parse(r#"version: "0.9.0""#).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
version: "1.0.0"
api:
  base_url: http://from-file
"#,
            )?;
            jail.set_env("QUIZGATE_API__BASE_URL", "http://from-env");
            jail.set_env("QUIZGATE_ROUTES__REDIRECT_TO", "/welcome");

            let config = load_config(Path::new("config.yaml"))?;
            assert_eq!(config.api.base_url, "http://from-env");
            assert_eq!(config.routes.redirect_to, "/welcome");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config(Path::new("does-not-exist.yaml"))?;
            assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
            Ok(())
        });
    }

    #[test]
    fn test_schema_mentions_sections() {
        let schema = schema_json().unwrap();
        assert!(schema.contains("base_url"));
        assert!(schema.contains("redirect_to"));
    }
}
