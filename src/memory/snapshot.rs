//! Load/save hooks for an external persistence collaborator.
//!
//! [`MemorySnapshot`] captures every record field plus the tier and working-memory
//! orderings. The engine never picks a byte format; callers serialize the snapshot
//! however they like (the `engram` binary uses JSON).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::store::MemoryStore;
use super::types::{MemoryRecord, Tier};
use crate::config::EngramConfig;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub version: u32,
    /// Records in scan order.
    pub records: Vec<MemoryRecord>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    /// Working memory, oldest first.
    pub working: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("duplicate memory id: {0}")]
    DuplicateId(String),
    #[error("memory {0} is indexed in more than one tier")]
    MultipleTiers(String),
    #[error("tier index references unknown memory {0}")]
    DanglingIndex(String),
    #[error("memory {0} is not indexed in any tier")]
    Unindexed(String),
    #[error("memory {id} has tier {tier} but is indexed as {index}")]
    TierMismatch {
        id: String,
        tier: Tier,
        index: &'static str,
    },
    #[error("working memory references unknown memory {0}")]
    DanglingContext(String),
}

impl MemoryStore {
    /// Capture the full store state.
    pub fn save(&self) -> MemorySnapshot {
        MemorySnapshot {
            version: SNAPSHOT_VERSION,
            records: self
                .scan_order()
                .filter_map(|id| self.records.get(id).cloned())
                .collect(),
            short_term: self.short_term.clone(),
            long_term: self.long_term.clone(),
            working: self.working.ids().map(str::to_string).collect(),
        }
    }

    /// Rebuild a store from a snapshot using default tuning.
    pub fn load(snapshot: MemorySnapshot) -> Result<Self, SnapshotError> {
        Self::load_with_config(&EngramConfig::default(), snapshot)
    }

    /// Rebuild a store from a snapshot, validating every tier invariant.
    pub fn load_with_config(
        config: &EngramConfig,
        snapshot: MemorySnapshot,
    ) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        let mut records = HashMap::with_capacity(snapshot.records.len());
        for record in snapshot.records {
            if records.contains_key(&record.id) {
                return Err(SnapshotError::DuplicateId(record.id));
            }
            records.insert(record.id.clone(), record);
        }

        let mut indexed = HashSet::with_capacity(records.len());
        let tiers = [
            (&snapshot.short_term, "short_term"),
            (&snapshot.long_term, "long_term"),
        ];
        for (ids, index) in tiers {
            for id in ids {
                let record = records
                    .get(id)
                    .ok_or_else(|| SnapshotError::DanglingIndex(id.clone()))?;
                if !indexed.insert(id.as_str()) {
                    return Err(SnapshotError::MultipleTiers(id.clone()));
                }
                let tier_matches = match index {
                    "short_term" => record.tier == Tier::ShortTerm,
                    _ => matches!(record.tier, Tier::LongTerm | Tier::Archived),
                };
                if !tier_matches {
                    return Err(SnapshotError::TierMismatch {
                        id: id.clone(),
                        tier: record.tier,
                        index,
                    });
                }
            }
        }
        if let Some(id) = records.keys().find(|id| !indexed.contains(id.as_str())) {
            return Err(SnapshotError::Unindexed(id.clone()));
        }
        if let Some(id) = snapshot.working.iter().find(|id| !records.contains_key(*id)) {
            return Err(SnapshotError::DanglingContext(id.clone()));
        }

        let mut store = MemoryStore::with_config(config);
        store.records = records;
        store.short_term = snapshot.short_term;
        store.long_term = snapshot.long_term;
        store.working.replace(snapshot.working);

        info!(
            records = store.records.len(),
            short_term = store.short_term.len(),
            long_term = store.long_term.len(),
            "memory store loaded"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::{MemoryKind, Metadata};

    fn populated() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.remember("solar panel output low", MemoryKind::Episodic, Metadata::default());
        store.remember("solar panel cleaning", MemoryKind::Procedural, Metadata::default());
        store.consolidate();
        store.remember("inverter fault code", MemoryKind::Semantic, Metadata::default());
        store
    }

    #[test]
    fn save_then_load_is_lossless() {
        let store = populated();
        let snapshot = store.save();
        let restored = MemoryStore::load(snapshot.clone()).unwrap();
        assert_eq!(restored.save(), snapshot);
        let (before, after) = (store.stats(), restored.stats());
        assert_eq!(after.short_term_count, before.short_term_count);
        assert_eq!(after.long_term_count, before.long_term_count);
        assert_eq!(after.working_memory_items, before.working_memory_items);
        assert!((after.avg_importance - before.avg_importance).abs() < 1e-9);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut snapshot = populated().save();
        snapshot.version = 99;
        assert_eq!(
            MemoryStore::load(snapshot).unwrap_err(),
            SnapshotError::UnsupportedVersion(99)
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut snapshot = populated().save();
        let dup = snapshot.records[0].clone();
        let id = dup.id.clone();
        snapshot.records.push(dup);
        assert_eq!(MemoryStore::load(snapshot).unwrap_err(), SnapshotError::DuplicateId(id));
    }

    #[test]
    fn rejects_record_in_two_tiers() {
        let mut snapshot = populated().save();
        let id = snapshot.long_term[0].clone();
        snapshot.short_term.push(id.clone());
        let err = MemoryStore::load(snapshot).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::TierMismatch { .. } | SnapshotError::MultipleTiers(_)
        ));
    }

    #[test]
    fn rejects_dangling_and_unindexed() {
        let mut snapshot = populated().save();
        snapshot.long_term.push("ghost".into());
        assert_eq!(
            MemoryStore::load(snapshot).unwrap_err(),
            SnapshotError::DanglingIndex("ghost".into())
        );

        let mut snapshot = populated().save();
        let id = snapshot.short_term.pop().unwrap();
        assert_eq!(MemoryStore::load(snapshot).unwrap_err(), SnapshotError::Unindexed(id));

        let mut snapshot = populated().save();
        snapshot.working.push("ghost".into());
        assert_eq!(
            MemoryStore::load(snapshot).unwrap_err(),
            SnapshotError::DanglingContext("ghost".into())
        );
    }
}
