//! Relationship graph: discovery, explicit linking and co-access strengthening.
//!
//! Edges live on the owning record as an ordered list. They are directed in
//! storage even when flagged `bidirectional`; no reverse edge is ever created.

use tracing::debug;

use super::keywords::{extract_keywords, jaccard};
use super::store::MemoryStore;
use super::types::{MemoryRecord, Relationship, RelationshipKind};

impl MemoryStore {
    /// Find records related to `record`, in scan order, capped at `max_related`.
    ///
    /// A candidate is related if `record` already has an edge to it, its keyword
    /// Jaccard similarity exceeds `similarity_threshold`, or it shares at least
    /// `min_shared_keywords` keywords. Each candidate is returned at most once.
    pub fn find_related(&self, record: &MemoryRecord) -> Vec<String> {
        let keywords = extract_keywords(&record.content);
        let mut related = Vec::new();

        for id in self.scan_order() {
            if related.len() >= self.retrieval.max_related {
                break;
            }
            if id == record.id {
                continue;
            }
            let Some(candidate) = self.records.get(id) else {
                continue;
            };

            let linked = record.relationships.iter().any(|r| r.target == id);
            let is_related = linked || {
                let other = extract_keywords(&candidate.content);
                jaccard(&keywords, &other) > self.retrieval.similarity_threshold
                    || keywords.intersection(&other).count() >= self.retrieval.min_shared_keywords
            };

            if is_related {
                related.push(id.to_string());
            }
        }

        related
    }

    /// Add an explicit edge from `from` to `to`.
    ///
    /// Returns `false` if `from` is unknown or an edge of the same kind to the same
    /// target already exists. The target is not required to exist.
    pub fn relate(
        &mut self,
        from: &str,
        to: &str,
        kind: RelationshipKind,
        strength: f64,
        bidirectional: bool,
    ) -> bool {
        let Some(record) = self.records.get_mut(from) else {
            return false;
        };
        if record.has_edge(to, kind) {
            return false;
        }
        record
            .relationships
            .push(Relationship::new(to, kind, strength, bidirectional));
        true
    }

    /// Outgoing edges of a record, in insertion order.
    pub fn relationships_of(&self, id: &str) -> &[Relationship] {
        self.records
            .get(id)
            .map(|r| r.relationships.as_slice())
            .unwrap_or(&[])
    }

    /// Reinforce edges whose target was accessed close in time to the source.
    ///
    /// Each edge gains `strengthen_step` (capped at 1.0) when the two records'
    /// `last_accessed` timestamps are less than `co_access_window_secs` apart.
    /// Edges to records that cannot be resolved are left untouched. Returns the
    /// number of edges whose strength changed.
    pub fn strengthen_relationships(&mut self, id: &str) -> usize {
        let Some(record) = self.records.get(id) else {
            return 0;
        };
        let anchor = record.last_accessed;
        let window_ms = self.consolidation.co_access_window_secs.saturating_mul(1000);

        let co_accessed: Vec<usize> = record
            .relationships
            .iter()
            .enumerate()
            .filter_map(|(i, edge)| {
                let target = self.resolve(&edge.target)?;
                let gap = (anchor - target.last_accessed).num_milliseconds().abs();
                (gap < window_ms).then_some(i)
            })
            .collect();

        let step = self.consolidation.strengthen_step;
        let Some(record) = self.records.get_mut(id) else {
            return 0;
        };

        let mut changed = 0;
        for i in co_accessed {
            let edge = &mut record.relationships[i];
            let next = (edge.strength + step).min(1.0);
            if next > edge.strength {
                edge.strength = next;
                changed += 1;
            }
        }

        if changed > 0 {
            debug!(id = %id, changed, "strengthened relationships");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::{MemoryKind, Metadata};

    #[test]
    fn shared_keywords_create_relates_to_edge() {
        let mut store = MemoryStore::new();
        let a = store.remember("proxmox server status", MemoryKind::Episodic, Metadata::default());
        let b = store.remember("proxmox server health", MemoryKind::Episodic, Metadata::default());

        assert!(a.relationships.is_empty());
        assert_eq!(b.relationships.len(), 1);
        let edge = &b.relationships[0];
        assert_eq!(edge.target, a.id);
        assert_eq!(edge.kind, RelationshipKind::RelatesTo);
        assert_eq!(edge.strength, 0.7);
        assert!(edge.bidirectional);
        // not mirrored onto the older record
        assert!(store.relationships_of(&a.id).is_empty());
    }

    #[test]
    fn single_shared_keyword_is_not_enough() {
        let mut store = MemoryStore::new();
        store.remember("garden watering schedule", MemoryKind::Episodic, Metadata::default());
        let b = store.remember("watering cans", MemoryKind::Episodic, Metadata::default());
        assert!(b.relationships.is_empty());
    }

    #[test]
    fn high_similarity_alone_links() {
        let mut store = MemoryStore::new();
        let a = store.remember("thermostat", MemoryKind::Semantic, Metadata::default());
        let b = store.remember("Thermostat!", MemoryKind::Semantic, Metadata::default());
        assert_eq!(b.relationships.len(), 1);
        assert_eq!(b.relationships[0].target, a.id);
    }

    #[test]
    fn discovery_caps_at_five_in_scan_order() {
        let mut store = MemoryStore::new();
        let ids: Vec<String> = (0..8)
            .map(|i| {
                store
                    .remember(format!("kitchen lights scene{i}"), MemoryKind::Working, Metadata::default())
                    .id
            })
            .collect();
        let incoming = MemoryRecord::new("kitchen lights", MemoryKind::Working, Metadata::default());
        let related = store.find_related(&incoming);
        assert_eq!(related, ids[..5].to_vec());
    }

    #[test]
    fn existing_edge_counts_as_related() {
        let mut store = MemoryStore::new();
        let a = store.remember("alpha", MemoryKind::Semantic, Metadata::default());
        let mut incoming = MemoryRecord::new("omega", MemoryKind::Semantic, Metadata::default());
        incoming
            .relationships
            .push(Relationship::new(a.id.clone(), RelationshipKind::Supports, 0.5, false));
        assert_eq!(store.find_related(&incoming), vec![a.id]);
    }

    #[test]
    fn relate_rejects_duplicates() {
        let mut store = MemoryStore::new();
        let a = store.remember("alpha", MemoryKind::Semantic, Metadata::default());
        let b = store.remember("beta", MemoryKind::Semantic, Metadata::default());
        assert!(store.relate(&a.id, &b.id, RelationshipKind::Causes, 0.4, false));
        assert!(!store.relate(&a.id, &b.id, RelationshipKind::Causes, 0.9, false));
        assert!(store.relate(&a.id, &b.id, RelationshipKind::Supports, 0.4, false));
        assert!(!store.relate("missing", &b.id, RelationshipKind::Causes, 0.4, false));
        assert_eq!(store.relationships_of(&a.id).len(), 2);
    }

    #[test]
    fn strengthening_caps_at_one_and_skips_dangling() {
        let mut store = MemoryStore::new();
        let a = store.remember("alpha", MemoryKind::Semantic, Metadata::default());
        let b = store.remember("beta", MemoryKind::Semantic, Metadata::default());
        store.relate(&b.id, &a.id, RelationshipKind::Supports, 0.95, false);
        store.relate(&b.id, "ghost", RelationshipKind::Supports, 0.5, false);

        assert_eq!(store.strengthen_relationships(&b.id), 1);
        let edges = store.relationships_of(&b.id);
        assert_eq!(edges[0].strength, 1.0);
        assert_eq!(edges[1].strength, 0.5);

        // already saturated
        assert_eq!(store.strengthen_relationships(&b.id), 0);
    }

    #[test]
    fn oversized_co_access_window_saturates() {
        let mut store = MemoryStore::new();
        store.consolidation.co_access_window_secs = i64::MAX;
        let a = store.remember("alpha", MemoryKind::Semantic, Metadata::default());
        let b = store.remember("beta", MemoryKind::Semantic, Metadata::default());
        store.relate(&b.id, &a.id, RelationshipKind::Supports, 0.5, false);

        assert_eq!(store.strengthen_relationships(&b.id), 1);
        assert!((store.relationships_of(&b.id)[0].strength - 0.6).abs() < 1e-9);
    }
}
