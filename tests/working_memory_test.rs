mod helpers;

use engram::memory::{MemoryKind, MemoryStore};

use helpers::{ids, remember};

#[test]
fn working_memory_keeps_the_last_twenty() {
    let mut store = MemoryStore::new();
    let all: Vec<String> = (0..25)
        .map(|i| remember(&mut store, &format!("distinct thought {i}"), MemoryKind::Working))
        .collect();

    let context = store.get_context();
    assert_eq!(context.len(), 20);
    assert_eq!(ids(&context), all[5..].to_vec());
    assert_eq!(store.stats().working_memory_items, 20);
}

#[test]
fn set_context_replaces_and_bounds() {
    let mut store = MemoryStore::new();
    let all: Vec<String> = (0..30)
        .map(|i| remember(&mut store, &format!("item {i} on the list"), MemoryKind::Episodic))
        .collect();

    store.set_context(&all[..3]);
    assert_eq!(ids(&store.get_context()), all[..3].to_vec());

    store.set_context(&all);
    assert_eq!(ids(&store.get_context()), all[10..].to_vec());
}
