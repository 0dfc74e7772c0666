//! Recall: rank every record against a query and touch the winners.

use serde::Serialize;
use tracing::debug;

use super::keywords::{extract_keywords, jaccard};
use super::store::MemoryStore;
use super::types::{MemoryKind, MemoryRecord};

const SEMANTIC_WEIGHT: f64 = 0.4;
const RECENCY_WEIGHT: f64 = 0.3;
const IMPORTANCE_WEIGHT: f64 = 0.3;

/// A scored candidate, before any access side effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMemory {
    pub id: String,
    pub score: f64,
}

impl MemoryStore {
    /// Score every record (optionally restricted to `kind`) against `query`.
    ///
    /// `score = 0.4 * keyword Jaccard + 0.3 * recency weight + 0.3 * importance`.
    /// Sorted descending; ties keep scan order (short-term insertion order, then
    /// long-term promotion order). Does not mutate anything.
    pub fn rank(&self, query: &str, kind: Option<MemoryKind>) -> Vec<RankedMemory> {
        let query_keywords = extract_keywords(query);

        let mut ranked: Vec<RankedMemory> = self
            .scan_order()
            .filter_map(|id| self.records.get(id))
            .filter(|record| kind.map_or(true, |k| record.kind == k))
            .map(|record| {
                let semantic = jaccard(&query_keywords, &extract_keywords(&record.content));
                let score = SEMANTIC_WEIGHT * semantic
                    + RECENCY_WEIGHT * record.importance.recency_weight
                    + IMPORTANCE_WEIGHT * record.total_score();
                RankedMemory {
                    id: record.id.clone(),
                    score,
                }
            })
            .collect();

        // stable: equal scores keep scan order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Return the `limit` best matches for `query`, accessing each one.
    ///
    /// Recall is a read with side effects: every returned record has its access
    /// count and importance refreshed, and the returned copies reflect that.
    pub fn recall(&mut self, query: &str, kind: Option<MemoryKind>, limit: usize) -> Vec<MemoryRecord> {
        let ranked = self.rank(query, kind);
        let total_matched = ranked.len();

        let results: Vec<MemoryRecord> = ranked
            .into_iter()
            .take(limit)
            .filter_map(|hit| self.access(&hit.id))
            .collect();

        debug!(
            query_len = query.len(),
            kind = ?kind,
            total_matched,
            returned = results.len(),
            "recall"
        );
        results
    }
}
