#![allow(dead_code)]

use chrono::{Duration, Utc};
use engram::memory::importance::ImportanceScore;
use engram::memory::{MemoryKind, MemoryRecord, MemoryStore, Metadata, Tier};

/// Remember `content` with default metadata and return the record id.
pub fn remember(store: &mut MemoryStore, content: &str, kind: MemoryKind) -> String {
    store.remember(content, kind, Metadata::default()).id
}

/// A low, fixed importance score (total 0.25).
pub fn low_importance() -> ImportanceScore {
    ImportanceScore {
        base_score: 0.5,
        recency_weight: 0.0,
        emotional_weight: 0.0,
        user_attention_weight: 0.0,
        system_relevance_weight: 0.0,
    }
}

/// Rebuild `store` through a snapshot after editing one record.
///
/// This is the only way to reach states like "long-term and untouched for a month"
/// without waiting, and it goes through the same validation as a real load.
pub fn rewrite_record(store: &MemoryStore, id: &str, edit: impl FnOnce(&mut MemoryRecord)) -> MemoryStore {
    let mut snapshot = store.save();
    let record = snapshot
        .records
        .iter_mut()
        .find(|r| r.id == id)
        .expect("record in snapshot");
    let before = record.tier;
    edit(record);
    let after = record.tier;

    if before == Tier::ShortTerm && after != Tier::ShortTerm {
        snapshot.short_term.retain(|s| s != id);
        snapshot.long_term.push(id.to_string());
    }
    MemoryStore::load(snapshot).expect("valid snapshot")
}

/// Move `id` to long-term, last accessed `days` ago, with low importance.
pub fn make_stale_long_term(store: &MemoryStore, id: &str, days: i64) -> MemoryStore {
    rewrite_record(store, id, |record| {
        record.tier = Tier::LongTerm;
        record.last_accessed = Utc::now() - Duration::days(days);
        record.importance = low_importance();
    })
}

/// Ids of `records`, in order.
pub fn ids(records: &[MemoryRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
