use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngramConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub store: StoreConfig,
    pub consolidation: ConsolidationConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

/// Where the host binary keeps its JSON snapshot. The engine itself never touches disk.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub snapshot_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Consolidation is forced once short-term holds more than half of this.
    pub max_short_term: usize,
    pub working_memory_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConsolidationConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub forgetting_threshold: f64,
    pub promotion_access_count: u32,
    pub summary_min_chars: usize,
    pub summary_sentences: usize,
    pub co_access_window_secs: i64,
    pub strengthen_step: f64,
    pub archive_after_days: i64,
    pub archive_importance_ceiling: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
    pub similarity_threshold: f64,
    pub min_shared_keywords: usize,
    pub max_related: usize,
    pub discovered_strength: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let snapshot_path = default_engram_dir()
            .join("memory.json")
            .to_string_lossy()
            .into_owned();
        Self { snapshot_path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_short_term: 100,
            working_memory_capacity: 20,
        }
    }
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 300,
            forgetting_threshold: 0.2,
            promotion_access_count: 3,
            summary_min_chars: 200,
            summary_sentences: 3,
            co_access_window_secs: 300,
            strengthen_step: 0.1,
            archive_after_days: 30,
            archive_importance_ceiling: 0.5,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            similarity_threshold: 0.7,
            min_shared_keywords: 2,
            max_related: 5,
            discovered_strength: 0.7,
        }
    }
}

/// Returns `~/.engram/`, or `./.engram/` when no home directory is known.
pub fn default_engram_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".engram")
}

/// Returns the default config file path: `~/.engram/config.toml`
pub fn default_config_path() -> PathBuf {
    default_engram_dir().join("config.toml")
}

impl EngramConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            EngramConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (ENGRAM_SNAPSHOT, ENGRAM_LOG_LEVEL, ENGRAM_CONSOLIDATION_INTERVAL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ENGRAM_SNAPSHOT") {
            self.storage.snapshot_path = val;
        }
        if let Ok(val) = std::env::var("ENGRAM_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("ENGRAM_CONSOLIDATION_INTERVAL") {
            match val.parse() {
                Ok(secs) => self.consolidation.interval_secs = secs,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid ENGRAM_CONSOLIDATION_INTERVAL"),
            }
        }
    }

    /// Resolve the snapshot path, expanding `~` if needed.
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        expand_tilde(&self.storage.snapshot_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
