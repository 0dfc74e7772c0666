use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::store::MemoryStore;
use super::types::{MemoryKind, Tier};

// ── Result types ─────────────────────────────────────────────────────────────

/// Outcome of one consolidation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidationReport {
    /// Records moved from short-term to long-term.
    pub promoted: usize,
    /// Promoted records with more than ten accesses.
    pub heavily_accessed: usize,
    pub relationships_strengthened: usize,
    /// Promoted records whose content was long enough to be condensed.
    pub summaries_created: usize,
    /// Long-term records newly marked archived.
    pub archived: usize,
}

impl ConsolidationReport {
    pub fn is_empty(&self) -> bool {
        self.promoted == 0 && self.archived == 0 && self.relationships_strengthened == 0
    }
}

const HEAVY_ACCESS_COUNT: u32 = 10;

// ── Summaries ────────────────────────────────────────────────────────────────

/// Condense long content to its first `sentences` `". "`-delimited segments.
///
/// Content shorter than `min_chars` characters is returned verbatim.
pub fn summarize(content: &str, min_chars: usize, sentences: usize) -> String {
    let length = content.chars().count();
    if length < min_chars {
        return content.to_string();
    }
    let key_points = content
        .split(". ")
        .take(sentences)
        .collect::<Vec<_>>()
        .join(". ");
    format!("[SUMMARY] {key_points}... [Original length: {length} chars]")
}

// ── Consolidation ────────────────────────────────────────────────────────────

impl MemoryStore {
    /// Promote short-term candidates to long-term, then archive stale long-term
    /// records.
    ///
    /// A short-term record is a candidate if its importance exceeds the
    /// forgetting-curve threshold, it has been accessed more than
    /// `promotion_access_count` times, or it is procedural. Candidates have their
    /// relationships strengthened, get a summary, and move to the long-term index.
    /// Never fails and never drops a record.
    pub fn consolidate(&mut self) -> ConsolidationReport {
        let now = Utc::now();
        let mut report = ConsolidationReport::default();

        let candidates: Vec<String> = self
            .short_term
            .iter()
            .filter(|id| {
                self.records
                    .get(id.as_str())
                    .is_some_and(|r| self.is_promotion_candidate(r.total_score(), r.access_count, r.kind))
            })
            .cloned()
            .collect();

        for id in &candidates {
            if let Some(record) = self.records.get_mut(id) {
                record.tier = Tier::Consolidating;
            }

            report.relationships_strengthened += self.strengthen_relationships(id);

            let min_chars = self.consolidation.summary_min_chars;
            let sentences = self.consolidation.summary_sentences;
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            let summary = summarize(&record.content, min_chars, sentences);
            if summary != record.content {
                report.summaries_created += 1;
            }
            record.summary = Some(summary);
            record.tier = Tier::LongTerm;
            if record.access_count > HEAVY_ACCESS_COUNT {
                report.heavily_accessed += 1;
            }

            self.short_term.retain(|s| s != id);
            self.long_term.push(id.clone());
            report.promoted += 1;
            debug!(id = %id, "promoted to long-term");
        }

        report.archived = self.archive_stale(now);

        if !report.is_empty() {
            info!(
                promoted = report.promoted,
                strengthened = report.relationships_strengthened,
                summaries = report.summaries_created,
                archived = report.archived,
                short_term = self.short_term.len(),
                long_term = self.long_term.len(),
                "consolidation pass complete"
            );
        }

        self.debug_check_invariants();
        report
    }

    fn is_promotion_candidate(&self, score: f64, access_count: u32, kind: MemoryKind) -> bool {
        score > self.consolidation.forgetting_threshold
            || access_count > self.consolidation.promotion_access_count
            || kind == MemoryKind::Procedural
    }

    /// Mark long-term records archived when they have not been accessed for
    /// `archive_after_days` and their importance is below
    /// `archive_importance_ceiling`. Archived records stay in the long-term index.
    /// An age too large to represent means nothing is old enough.
    fn archive_stale(&mut self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = Duration::try_days(self.consolidation.archive_after_days)
            .and_then(|age| now.checked_sub_signed(age))
        else {
            return 0;
        };
        let ceiling = self.consolidation.archive_importance_ceiling;
        let mut archived = 0;

        for id in &self.long_term {
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            if record.tier == Tier::LongTerm
                && record.last_accessed < cutoff
                && record.total_score() < ceiling
            {
                record.tier = Tier::Archived;
                archived += 1;
                debug!(id = %id, "archived");
            }
        }

        archived
    }
}
