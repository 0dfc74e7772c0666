use serde::Serialize;

use super::store::MemoryStore;
use super::types::{MemoryKind, Tier};

/// Point-in-time snapshot of store population. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub short_term_count: usize,
    /// Includes archived records.
    pub long_term_count: usize,
    pub archived_count: usize,
    pub working_memory_items: usize,
    /// Mean total importance over all records, 0 when empty.
    pub avg_importance: f64,
    /// Episodic records across both tiers.
    pub total_conversations: usize,
}

impl MemoryStore {
    /// Compute memory store statistics.
    pub fn stats(&self) -> MemoryStats {
        let all = || self.records.values();

        let avg_importance = if self.records.is_empty() {
            0.0
        } else {
            // scan order keeps the float sum reproducible
            self.scan_order()
                .filter_map(|id| self.records.get(id))
                .map(|r| r.total_score())
                .sum::<f64>()
                / self.records.len() as f64
        };

        MemoryStats {
            short_term_count: self.short_term.len(),
            long_term_count: self.long_term.len(),
            archived_count: all().filter(|r| r.tier == Tier::Archived).count(),
            working_memory_items: self.working.len(),
            avg_importance,
            total_conversations: all().filter(|r| r.kind == MemoryKind::Episodic).count(),
        }
    }
}
