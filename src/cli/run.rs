//! Long-running mode: background consolidation plus a line-oriented stdin loop.
//!
//! Each input line is remembered as a user conversation turn. Lines starting with
//! `?` are recalled instead. EOF, a read error or ctrl-c stops the scheduler and
//! saves.

use anyhow::Result;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use engram::config::EngramConfig;
use engram::interface::{ConversationDetails, MemoryInterface};
use engram::memory::lock_store;
use engram::scheduler::ConsolidationScheduler;

pub async fn run(config: EngramConfig) -> Result<()> {
    let store = super::open_store(&config)?.into_shared();
    let memory = MemoryInterface::new(store.clone(), &config.retrieval);

    let scheduler = if config.consolidation.enabled {
        Some(ConsolidationScheduler::start(
            store.clone(),
            Duration::from_secs(config.consolidation.interval_secs),
        ))
    } else {
        tracing::info!("background consolidation disabled");
        None
    };

    tokio::select! {
        handled = session(&memory, BufReader::new(tokio::io::stdin())) => {
            tracing::debug!(lines = handled, "input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }

    let store = lock_store(&store);
    super::save_store(&config, &store)?;
    println!("Saved {} memories.", store.len());
    Ok(())
}

/// Feed lines from `input` to the memory until EOF or a read error.
///
/// Lines that are not valid UTF-8 are skipped. Returns the number of lines handled.
async fn session<R: AsyncBufRead + Unpin>(memory: &MemoryInterface, mut input: R) -> usize {
    let mut handled = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input, ending session");
                break;
            }
        }
        match std::str::from_utf8(&buf) {
            Ok(line) => {
                handle_line(memory, line.trim());
                handled += 1;
            }
            Err(e) => tracing::warn!(error = %e, "skipping line that is not valid UTF-8"),
        }
    }
    handled
}

fn handle_line(memory: &MemoryInterface, line: &str) {
    if line.is_empty() {
        return;
    }
    if let Some(query) = line.strip_prefix('?') {
        let results = memory.recall_relevant(query.trim(), None);
        if results.is_empty() {
            println!("(nothing recalled)");
        }
        for record in results {
            println!("  [{}] {}", record.kind, super::preview(&record.content, 100));
        }
        return;
    }

    let record = memory.remember_conversation(line, "user", ConversationDetails::default());
    println!("  remembered {} ({} links)", record.id, record.relationships.len());
}
