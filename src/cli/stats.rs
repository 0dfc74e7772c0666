use anyhow::Result;

use engram::config::EngramConfig;

/// Display memory statistics in the terminal.
pub fn stats(config: &EngramConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let stats = store.stats();

    println!("Memory Statistics");
    println!("{}", "=".repeat(40));
    println!("  Short-term:          {}", stats.short_term_count);
    println!("  Long-term:           {}", stats.long_term_count);
    println!("    of which archived: {}", stats.archived_count);
    println!("  Working memory:      {}", stats.working_memory_items);
    println!("  Conversations:       {}", stats.total_conversations);
    println!("  Avg importance:      {:.3}", stats.avg_importance);
    println!();
    println!("Snapshot: {}", config.resolved_snapshot_path().display());

    Ok(())
}
