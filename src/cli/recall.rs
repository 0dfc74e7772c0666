use anyhow::Result;

use engram::config::EngramConfig;
use engram::memory::MemoryKind;

/// Run a recall from the terminal. Recall updates access counts, so the snapshot
/// is saved afterwards.
pub fn recall(config: &EngramConfig, query: &str, kind: Option<MemoryKind>, limit: Option<usize>) -> Result<()> {
    let mut store = super::open_store(config)?;
    let limit = limit.unwrap_or(config.retrieval.default_limit);

    let scores: std::collections::HashMap<String, f64> = store
        .rank(query, kind)
        .into_iter()
        .map(|hit| (hit.id, hit.score))
        .collect();
    let results = store.recall(query, kind, limit);
    super::save_store(config, &store)?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());

    for (i, record) in results.iter().enumerate() {
        println!(
            "  {}. [{}/{}] {} (importance: {:.3}, score: {:.4}, accesses: {})",
            i + 1,
            record.kind,
            record.tier,
            record.id,
            record.total_score(),
            scores.get(&record.id).copied().unwrap_or_default(),
            record.access_count,
        );
        println!("     {}", super::preview(&record.content, 120));
        println!();
    }

    Ok(())
}
