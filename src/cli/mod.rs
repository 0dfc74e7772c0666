pub mod context;
pub mod maintenance;
pub mod recall;
pub mod remember;
pub mod run;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;

use engram::config::EngramConfig;
use engram::memory::{MemorySnapshot, MemoryStore};

/// Open the store from the configured snapshot file, or start empty if none exists.
pub fn open_store(config: &EngramConfig) -> Result<MemoryStore> {
    let path = config.resolved_snapshot_path();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no snapshot yet, starting with an empty store");
        return Ok(MemoryStore::with_config(config));
    }
    let snapshot = read_snapshot(&path)?;
    MemoryStore::load_with_config(config, snapshot)
        .with_context(|| format!("invalid snapshot: {}", path.display()))
}

/// Write the store to the configured snapshot file.
pub fn save_store(config: &EngramConfig, store: &MemoryStore) -> Result<()> {
    write_snapshot(&config.resolved_snapshot_path(), &store.save())
}

pub fn read_snapshot(path: &Path) -> Result<MemorySnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&contents).context("failed to parse snapshot JSON")
}

/// Atomic write (tmp + rename).
pub fn write_snapshot(path: &Path, snapshot: &MemorySnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create snapshot dir: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, json)
        .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path).context("failed to rename temp file")?;
    tracing::debug!(path = %path.display(), records = snapshot.records.len(), "snapshot saved");
    Ok(())
}

/// Truncate to `max_chars` characters, appending "..." if truncated.
pub fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let head: String = content.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
