mod helpers;

use chrono::{Duration, Utc};
use engram::memory::types::RelationshipKind;
use engram::memory::{MemoryKind, MemoryStore, Metadata};

use helpers::rewrite_record;

#[test]
fn shared_keywords_link_new_memory_to_old() {
    let mut store = MemoryStore::new();
    let status = store.remember("proxmox server status", MemoryKind::Episodic, Metadata::default());
    let health = store.remember("proxmox server health", MemoryKind::Episodic, Metadata::default());

    let edges = store.relationships_of(&health.id);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, status.id);
    assert_eq!(edges[0].kind, RelationshipKind::RelatesTo);
    assert!((edges[0].strength - 0.7).abs() < 1e-9);
    assert!(edges[0].bidirectional);

    // discovery stores the edge on the new record only
    assert!(store.relationships_of(&status.id).is_empty());
}

#[test]
fn unrelated_memories_stay_unlinked() {
    let mut store = MemoryStore::new();
    store.remember("grocery list needs eggs", MemoryKind::Episodic, Metadata::default());
    let other = store.remember("proxmox server health", MemoryKind::Episodic, Metadata::default());
    assert!(other.relationships.is_empty());
}

#[test]
fn consolidation_strengthens_edges_between_co_accessed_memories() {
    let mut store = MemoryStore::new();
    store.remember("proxmox server status", MemoryKind::Episodic, Metadata::default());
    let health = store.remember("proxmox server health", MemoryKind::Episodic, Metadata::default());

    let report = store.consolidate();
    assert_eq!(report.relationships_strengthened, 1);
    let strength = store.relationships_of(&health.id)[0].strength;
    assert!((strength - 0.8).abs() < 1e-9);
}

#[test]
fn edges_between_memories_accessed_far_apart_are_not_strengthened() {
    let mut store = MemoryStore::new();
    let status = store.remember("proxmox server status", MemoryKind::Episodic, Metadata::default());
    let health = store.remember("proxmox server health", MemoryKind::Episodic, Metadata::default());
    let mut store = rewrite_record(&store, &status.id, |record| {
        record.last_accessed = Utc::now() - Duration::seconds(301);
    });

    let report = store.consolidate();
    assert_eq!(report.promoted, 2);
    assert_eq!(report.relationships_strengthened, 0);
    let strength = store.relationships_of(&health.id)[0].strength;
    assert!((strength - 0.7).abs() < 1e-9);
}

#[test]
fn explicit_relations_are_deduplicated() {
    let mut store = MemoryStore::new();
    let a = store.remember("kitchen renovation budget", MemoryKind::Semantic, Metadata::default());
    let b = store.remember("contractor phone number", MemoryKind::Semantic, Metadata::default());

    assert!(store.relate(&a.id, &b.id, RelationshipKind::Requires, 0.9, false));
    assert!(!store.relate(&a.id, &b.id, RelationshipKind::Requires, 0.4, false));
    assert!(store.relate(&a.id, &b.id, RelationshipKind::Supports, 0.4, false));
    assert_eq!(store.relationships_of(&a.id).len(), 2);
}
