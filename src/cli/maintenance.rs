//! CLI maintenance command: run a consolidation pass on demand.

use anyhow::Result;

use engram::config::EngramConfig;

/// Run one consolidation pass and persist the result.
pub fn consolidate(config: &EngramConfig) -> Result<()> {
    let mut store = super::open_store(config)?;

    println!("Running consolidation...");
    let report = store.consolidate();
    super::save_store(config, &store)?;

    if report.promoted > 0 {
        println!(
            "  Promoted {} memories to long-term ({} summarized, {} heavily accessed).",
            report.promoted, report.summaries_created, report.heavily_accessed,
        );
    } else {
        println!("  No short-term memories eligible for promotion.");
    }

    if report.relationships_strengthened > 0 {
        println!("  Strengthened {} relationships.", report.relationships_strengthened);
    }

    if report.archived > 0 {
        println!("  Archived {} stale memories.", report.archived);
    } else {
        println!("  No long-term memories to archive.");
    }

    println!("Consolidation complete.");
    Ok(())
}
