//! CLI command implementations.

pub mod config;
pub mod gift;
pub mod price;
pub mod rank;
pub mod suggest;

use anyhow::{Context, Result};
use std::time::Duration;

use storagift_fetch::{HttpClient, RankOptions, UsageCache};
use storagift_providers::{GlideClient, NeynarClient, StorageRegistryClient};
use storagift_store::Config;

use crate::Cli;

/// Loads configuration from `--config` or the default path.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn env_credential(var: &str, what: &str) -> Result<String> {
    std::env::var(var).with_context(|| format!("{what} not set (expected in ${var})"))
}

/// Builds the social-graph client from config and environment.
pub fn build_graph(config: &Config) -> Result<NeynarClient> {
    let api_key = env_credential(&config.providers.neynar_api_key_env, "API key")?;
    let http = HttpClient::new()?;
    let client = match &config.providers.neynar_base_url {
        Some(base) => NeynarClient::with_base_url(http, base, api_key),
        None => NeynarClient::new(http, api_key),
    };
    Ok(client)
}

/// Builds the storage-registry client from config.
pub fn build_registry(config: &Config) -> Result<StorageRegistryClient> {
    let http = HttpClient::new()?;
    let registry = match &config.providers.registry_address {
        Some(address) => {
            StorageRegistryClient::with_address(http, &config.providers.rpc_url, address)
        }
        None => StorageRegistryClient::new(http, &config.providers.rpc_url),
    };
    Ok(registry)
}

/// Builds the payment-gateway client from config and environment.
pub fn build_gateway(config: &Config) -> Result<GlideClient> {
    let project_id = env_credential(&config.providers.glide_project_id_env, "Project id")?;
    let registry = build_registry(config)?;
    let http = HttpClient::new()?;
    let chain = storagift_providers::contract::STORAGE_REGISTRY_CHAIN;
    let client = match &config.providers.glide_base_url {
        Some(base) => GlideClient::with_base_url(http, base, project_id, registry, chain),
        None => GlideClient::new(http, project_id, registry, chain),
    };
    Ok(client)
}

/// Translates pipeline config into rank options.
pub fn rank_options(config: &Config) -> RankOptions {
    RankOptions {
        follow_limit: config.pipeline.follow_limit,
        batch_size: config.pipeline.batch_size,
        call_timeout: Duration::from_secs(config.pipeline.call_timeout_secs),
    }
}

/// Builds a usage cache sized from config.
pub fn build_cache(config: &Config) -> UsageCache {
    UsageCache::with_capacity(config.pipeline.cache_capacity)
}
