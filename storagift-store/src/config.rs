//! Configuration management.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Provider endpoints and credentials.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Ranking pipeline tuning.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Entries shown per page.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Cap on the number of pages shown.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

/// Provider endpoints and credentials.
///
/// API keys are never stored in the file; only the environment variable
/// names that hold them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Environment variable holding the social-graph API key.
    #[serde(default = "default_neynar_key_env")]
    pub neynar_api_key_env: String,
    /// Environment variable holding the payment-gateway project id.
    #[serde(default = "default_glide_project_env")]
    pub glide_project_id_env: String,
    /// JSON-RPC endpoint for registry reads.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Storage registry contract address override.
    pub registry_address: Option<String>,
    /// Social-graph API base URL override.
    pub neynar_base_url: Option<String>,
    /// Payment-gateway API base URL override.
    pub glide_base_url: Option<String>,
}

/// Ranking pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Follow-list fetch cap.
    #[serde(default = "default_follow_limit")]
    pub follow_limit: usize,
    /// Usage fetches issued concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Per-call timeout in seconds.
    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,
    /// Usage cache capacity in entries.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_items_per_page() -> usize {
    1
}

fn default_max_pages() -> usize {
    5
}

fn default_neynar_key_env() -> String {
    "NEYNAR_API_KEY".to_string()
}

fn default_glide_project_env() -> String {
    "GLIDE_PROJECT_ID".to_string()
}

fn default_rpc_url() -> String {
    "https://mainnet.optimism.io".to_string()
}

fn default_follow_limit() -> usize {
    100
}

fn default_batch_size() -> usize {
    15
}

fn default_call_timeout() -> u64 {
    10
}

fn default_cache_capacity() -> usize {
    512
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            items_per_page: default_items_per_page(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            neynar_api_key_env: default_neynar_key_env(),
            glide_project_id_env: default_glide_project_env(),
            rpc_url: default_rpc_url(),
            registry_address: None,
            neynar_base_url: None,
            glide_base_url: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            follow_limit: default_follow_limit(),
            batch_size: default_batch_size(),
            call_timeout_secs: default_call_timeout(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            providers: ProvidersConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storagift")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.items_per_page, 1);
        assert_eq!(config.general.max_pages, 5);
        assert_eq!(config.pipeline.follow_limit, 100);
        assert_eq!(config.pipeline.batch_size, 15);
        assert_eq!(config.pipeline.cache_capacity, 512);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"pipeline": {"batch_size": 5}}"#).unwrap();
        assert_eq!(config.pipeline.batch_size, 5);
        assert_eq!(config.pipeline.follow_limit, 100);
        assert_eq!(config.general.max_pages, 5);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.pipeline.follow_limit = 40;
        config.providers.registry_address = Some("0x01".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.pipeline.follow_limit, 40);
        assert_eq!(loaded.providers.registry_address.as_deref(), Some("0x01"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.pipeline.batch_size, 15);
    }
}
