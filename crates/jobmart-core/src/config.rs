use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::MartId;

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Fallback warehouse path when neither config nor JOBMART_DB_PATH is set.
/// Matches the mount point used by the deployment file share.
pub const DEFAULT_DB_PATH: &str = "/mnt/data/job_ads.db";
/// Loaded-table cache lifetime. One hour — the warehouse is rebuilt weekly,
/// so anything short of a day only bounds staleness after a manual rerun.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Top-level config (jobmart.toml + JOBMART_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobmartConfig {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Default for JobmartConfig {
    fn default() -> Self {
        Self {
            warehouse: WarehouseConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Path to the warehouse database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Marts read on each load. Defaults to every known mart.
    #[serde(default = "default_marts")]
    pub marts: Vec<MartId>,
    /// How long a loaded table stays fresh before the next request reloads it.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            marts: default_marts(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Convenience pre-selection for the region dropdown.
    #[serde(default)]
    pub region_default: RegionDefault,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            region_default: RegionDefault::default(),
        }
    }
}

/// How the region level behaves when the user has made no selection yet.
///
/// This is a convenience default for the top drilldown level only — deeper
/// levels are never auto-selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RegionDefault {
    /// Pre-select the named region when present, otherwise fall back to the
    /// first available region in sorted order.
    Preferred { region: String },
    /// Pre-select the first available region in sorted order.
    FirstAvailable,
    /// No auto-selection — the user must pick a region.
    Unset,
}

impl Default for RegionDefault {
    fn default() -> Self {
        RegionDefault::Preferred {
            region: "Stockholms län".to_string(),
        }
    }
}

fn default_db_path() -> String {
    std::env::var("JOBMART_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
}
fn default_marts() -> Vec<MartId> {
    MartId::ALL.to_vec()
}
fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl JobmartConfig {
    /// Load config from a TOML file with JOBMART_* env var overrides.
    ///
    /// Env keys use a double underscore between the section and the field,
    /// since field names themselves contain underscores:
    /// `JOBMART_WAREHOUSE__DB_PATH` overrides `warehouse.db_path`,
    /// `JOBMART_DASHBOARD__PORT` overrides `dashboard.port`.
    ///
    /// Path resolution order:
    ///   1. Explicit path argument
    ///   2. JOBMART_CONFIG env var
    ///   3. ./jobmart.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("JOBMART_CONFIG").ok())
            .unwrap_or_else(|| "jobmart.toml".to_string());

        let config: JobmartConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("JOBMART_").split("__"))
            .extract()
            .map_err(|e| crate::error::JobmartError::Config(e.to_string()))?;

        Ok(config)
    }
}
