use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::movies::OmdbConfig;
use crate::session::OverlapPolicy;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of front-end assets served for non-API paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

/// Durable storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("movie_explorer.db")
}

/// Search session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period before a live search fires, in milliseconds (default: 700)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Query run once at startup. Empty disables it.
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Handling of a new search while one is in flight
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_query: default_query(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    700
}

fn default_query() -> String {
    "Avengers".to_string()
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub omdb: SanitizedOmdbConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

/// Sanitized OMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            omdb: SanitizedOmdbConfig {
                base_url: config.omdb.base_url.clone(),
                api_key_configured: !config.omdb.api_key.trim().is_empty(),
                timeout_secs: config.omdb.timeout_secs,
            },
            server: config.server.clone(),
            storage: config.storage.clone(),
            search: config.search.clone(),
        }
    }
}
