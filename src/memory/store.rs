//! Write path and tier bookkeeping.
//!
//! [`MemoryStore`] owns every record in a single arena keyed by id. The short-term
//! and long-term tiers are ordered id indexes into that arena, so a record can never
//! be stored twice. [`MemoryStore::remember`] is the only way records are created.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use super::types::{MemoryKind, MemoryRecord, Metadata, Relationship, RelationshipKind, Tier};
use super::working::WorkingMemory;
use crate::config::{ConsolidationConfig, EngramConfig, RetrievalConfig, StoreConfig};

/// A store shared between the host, the facade and the consolidation scheduler.
pub type SharedStore = Arc<Mutex<MemoryStore>>;

/// Lock a shared store, recovering the guard if a previous holder panicked.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, MemoryStore> {
    store.lock().unwrap_or_else(|poisoned| {
        warn!("memory store lock was poisoned, continuing with inner state");
        poisoned.into_inner()
    })
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    pub(crate) records: HashMap<String, MemoryRecord>,
    /// Insertion order.
    pub(crate) short_term: Vec<String>,
    /// Promotion order. Archived records stay here.
    pub(crate) long_term: Vec<String>,
    pub(crate) working: WorkingMemory,
    pub(crate) store_config: StoreConfig,
    pub(crate) consolidation: ConsolidationConfig,
    pub(crate) retrieval: RetrievalConfig,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with default tuning.
    pub fn new() -> Self {
        Self::with_config(&EngramConfig::default())
    }

    pub fn with_config(config: &EngramConfig) -> Self {
        Self {
            records: HashMap::new(),
            short_term: Vec::new(),
            long_term: Vec::new(),
            working: WorkingMemory::new(config.store.working_memory_capacity),
            store_config: config.store.clone(),
            consolidation: config.consolidation.clone(),
            retrieval: config.retrieval.clone(),
        }
    }

    /// Wrap the store for sharing with the scheduler and facade.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Create a short-term record, link it to related memories and bring it into
    /// working memory.
    ///
    /// When short-term grows past half of `max_short_term`, a consolidation pass
    /// runs before returning. The returned record reflects that pass.
    pub fn remember(
        &mut self,
        content: impl Into<String>,
        kind: MemoryKind,
        metadata: Metadata,
    ) -> MemoryRecord {
        let mut record = MemoryRecord::new(content, kind, metadata);

        for target in self.find_related(&record) {
            if record.has_edge(&target, RelationshipKind::RelatesTo) {
                continue;
            }
            record.relationships.push(Relationship::new(
                target,
                RelationshipKind::RelatesTo,
                self.retrieval.discovered_strength,
                true,
            ));
        }

        let id = record.id.clone();
        assert!(
            !self.records.contains_key(&id),
            "duplicate memory id: {id}"
        );

        debug!(
            id = %id,
            kind = %kind,
            content_len = record.content.len(),
            links = record.relationships.len(),
            importance = record.total_score(),
            "remembered"
        );

        self.records.insert(id.clone(), record);
        self.short_term.push(id.clone());
        self.working.push(id.clone());

        if self.short_term.len() > self.store_config.max_short_term / 2 {
            debug!(
                short_term = self.short_term.len(),
                max = self.store_config.max_short_term,
                "short-term over half capacity, consolidating"
            );
            self.consolidate();
        }

        self.debug_check_invariants();
        self.records[&id].clone()
    }

    /// Touch a record: bump its access count and rescore importance.
    ///
    /// Returns `None` for unknown ids.
    pub fn access(&mut self, id: &str) -> Option<MemoryRecord> {
        let record = self.records.get_mut(id)?;
        record.access(Utc::now());
        Some(record.clone())
    }

    /// Look up a record by id without touching it. Archived records are included.
    pub fn get(&self, id: &str) -> Option<&MemoryRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn short_term_ids(&self) -> &[String] {
        &self.short_term
    }

    pub fn long_term_ids(&self) -> &[String] {
        &self.long_term
    }

    /// Ids of all records in scan order: short-term by insertion, then long-term by
    /// promotion.
    pub fn scan_order(&self) -> impl Iterator<Item = &str> {
        self.short_term
            .iter()
            .chain(self.long_term.iter())
            .map(String::as_str)
    }

    /// Resolve a record that lives in either tier index.
    pub(crate) fn resolve(&self, id: &str) -> Option<&MemoryRecord> {
        if self.short_term.iter().any(|i| i == id) || self.long_term.iter().any(|i| i == id) {
            self.records.get(id)
        } else {
            None
        }
    }

    /// Records currently in working memory, oldest first.
    pub fn get_context(&self) -> Vec<MemoryRecord> {
        self.working
            .ids()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    /// Replace working memory. Unknown ids are skipped; only the most recent
    /// `working_memory_capacity` ids are kept.
    pub fn set_context<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if self.records.contains_key(id) {
                known.push(id.to_string());
            } else {
                warn!(id = %id, "ignoring unknown id in working-memory context");
            }
        }
        self.working.replace(known);
    }

    /// Append one record to working memory. Returns `false` for unknown ids.
    pub fn push_context(&mut self, id: &str) -> bool {
        if !self.records.contains_key(id) {
            return false;
        }
        self.working.push(id);
        true
    }

    /// Edit a record's metadata in place. Returns `false` for unknown ids.
    pub fn annotate(&mut self, id: &str, edit: impl FnOnce(&mut Metadata)) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                edit(&mut record.metadata);
                true
            }
            None => false,
        }
    }

    /// Panic if the tier indexes and the arena disagree.
    ///
    /// Every record id must appear in exactly one of the short-term or long-term
    /// indexes, and every indexed id must resolve to a record.
    pub fn check_invariants(&self) {
        let mut seen = HashSet::with_capacity(self.records.len());
        for id in &self.short_term {
            assert!(seen.insert(id.as_str()), "memory {id} indexed twice");
            let record = self
                .records
                .get(id)
                .unwrap_or_else(|| panic!("short-term index points at missing memory {id}"));
            assert_eq!(record.tier, Tier::ShortTerm, "memory {id} in short-term index with tier {}", record.tier);
        }
        for id in &self.long_term {
            assert!(seen.insert(id.as_str()), "memory {id} indexed twice");
            let record = self
                .records
                .get(id)
                .unwrap_or_else(|| panic!("long-term index points at missing memory {id}"));
            assert!(
                matches!(record.tier, Tier::LongTerm | Tier::Archived),
                "memory {id} in long-term index with tier {}",
                record.tier
            );
        }
        assert_eq!(seen.len(), self.records.len(), "memory not present in any tier");
    }

    #[inline]
    pub(crate) fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        self.check_invariants();
    }
}
