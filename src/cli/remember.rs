use anyhow::Result;

use engram::config::EngramConfig;
use engram::memory::{MemoryKind, Metadata};

/// Remember one observation and persist the snapshot.
pub fn remember(config: &EngramConfig, content: &str, kind: MemoryKind, tags: Vec<String>) -> Result<()> {
    let mut store = super::open_store(config)?;

    let metadata = Metadata {
        tags: tags.into_iter().collect(),
        ..Metadata::default()
    };
    let record = store.remember(content, kind, metadata);
    super::save_store(config, &store)?;

    println!("Remembered {} [{}] (importance: {:.3})", record.id, record.kind, record.total_score());
    if !record.relationships.is_empty() {
        println!("  Linked to {} related memories:", record.relationships.len());
        for edge in &record.relationships {
            println!("    {} (strength: {:.2})", edge.target, edge.strength);
        }
    }
    if record.tier != engram::memory::Tier::ShortTerm {
        println!("  Short-term overflowed; consolidated to {}.", record.tier);
    }

    Ok(())
}
