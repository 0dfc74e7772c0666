//! Importance scoring.
//!
//! A record's importance is a fixed per-kind base score scaled by the mean of four
//! weights (recency, emotional, user attention, system relevance). The base is
//! scaled into `[0.5 * base, base]`, so the total always stays within `[0, 1]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{MemoryKind, Metadata};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Increment applied to the user-attention weight on every access.
pub const ATTENTION_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportanceScore {
    pub base_score: f64,
    pub recency_weight: f64,
    pub emotional_weight: f64,
    pub user_attention_weight: f64,
    pub system_relevance_weight: f64,
}

impl ImportanceScore {
    /// Score assigned when a record is created.
    pub fn initial(kind: MemoryKind, content: &str, metadata: &Metadata) -> Self {
        Self {
            base_score: base_score(kind, content),
            recency_weight: 1.0,
            emotional_weight: if metadata.is_emotional { 0.8 } else { 0.3 },
            user_attention_weight: if metadata.user_initiated { 0.9 } else { 0.4 },
            system_relevance_weight: 0.5,
        }
    }

    /// `base * (0.5 + mean(weights) * 0.5)`.
    pub fn total_score(&self) -> f64 {
        let weights = [
            self.recency_weight,
            self.emotional_weight,
            self.user_attention_weight,
            self.system_relevance_weight,
        ];
        let avg = weights.iter().map(|w| w.clamp(0.0, 1.0)).sum::<f64>() / weights.len() as f64;
        self.base_score.clamp(0.0, 1.0) * (0.5 + avg * 0.5)
    }

    /// Rescore after an access at `now`, with recency measured from `since`.
    ///
    /// Records pass their freshly updated `last_accessed` as `since`, so recency
    /// resets to 1.0 on every access.
    pub fn accessed(&self, since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - since).num_milliseconds() as f64 / 1000.0;
        Self {
            recency_weight: recency_weight(elapsed),
            user_attention_weight: (self.user_attention_weight + ATTENTION_STEP).min(1.0),
            ..*self
        }
    }
}

/// Per-kind base score.
///
/// The semantic keyword check is a case-sensitive substring match.
pub fn base_score(kind: MemoryKind, content: &str) -> f64 {
    match kind {
        MemoryKind::Episodic => 0.6,
        MemoryKind::Semantic => {
            if content.contains("critical") || content.contains("important") {
                0.8
            } else {
                0.5
            }
        }
        MemoryKind::Procedural => 0.7,
        MemoryKind::Working => 0.8,
        MemoryKind::Emotional => 0.9,
    }
}

/// Linear one-day falloff, clamped to `[0, 1]`.
pub fn recency_weight(elapsed_secs: f64) -> f64 {
    (1.0 - elapsed_secs / SECONDS_PER_DAY).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn score(kind: MemoryKind, content: &str, emotional: bool, user: bool) -> ImportanceScore {
        let metadata = Metadata {
            is_emotional: emotional,
            user_initiated: user,
            ..Metadata::default()
        };
        ImportanceScore::initial(kind, content, &metadata)
    }

    #[test]
    fn base_scores_by_kind() {
        assert_eq!(base_score(MemoryKind::Episodic, "x"), 0.6);
        assert_eq!(base_score(MemoryKind::Semantic, "x"), 0.5);
        assert_eq!(base_score(MemoryKind::Procedural, "x"), 0.7);
        assert_eq!(base_score(MemoryKind::Working, "x"), 0.8);
        assert_eq!(base_score(MemoryKind::Emotional, "x"), 0.9);
    }

    #[test]
    fn semantic_keyword_boost_is_case_sensitive() {
        assert_eq!(base_score(MemoryKind::Semantic, "this is critical"), 0.8);
        assert_eq!(base_score(MemoryKind::Semantic, "an important fact"), 0.8);
        assert_eq!(base_score(MemoryKind::Semantic, "CRITICAL outage"), 0.5);
        assert_eq!(base_score(MemoryKind::Episodic, "important"), 0.6);
    }

    #[test]
    fn total_score_formula() {
        // weights: 1.0, 0.3, 0.9, 0.5 -> avg 0.675
        let s = score(MemoryKind::Episodic, "hello", false, true);
        let expected = 0.6 * (0.5 + 0.675 * 0.5);
        assert!((s.total_score() - expected).abs() < 1e-9);
    }

    #[test]
    fn total_score_stays_in_unit_interval() {
        for kind in MemoryKind::ALL {
            for emotional in [false, true] {
                for user in [false, true] {
                    let mut s = score(kind, "critical important", emotional, user);
                    let t = s.total_score();
                    assert!((0.0..=1.0).contains(&t), "{kind}: {t}");
                    s.recency_weight = 0.0;
                    s.user_attention_weight = 1.0;
                    assert!((0.0..=1.0).contains(&s.total_score()));
                }
            }
        }
        let extreme = ImportanceScore {
            base_score: 3.0,
            recency_weight: 7.0,
            emotional_weight: -2.0,
            user_attention_weight: 1.0,
            system_relevance_weight: 1.0,
        };
        assert!((0.0..=1.0).contains(&extreme.total_score()));
    }

    #[test]
    fn access_resets_recency_and_raises_attention() {
        let mut s = score(MemoryKind::Semantic, "fact", false, false);
        s.recency_weight = 0.2;
        let now = Utc::now();
        let after = s.accessed(now, now);
        assert_eq!(after.recency_weight, 1.0);
        assert!((after.user_attention_weight - 0.5).abs() < 1e-9);
        assert_eq!(after.emotional_weight, s.emotional_weight);
        assert_eq!(after.system_relevance_weight, 0.5);
        assert!(after.total_score() >= s.total_score());
    }

    #[test]
    fn attention_is_capped() {
        let s = score(MemoryKind::Working, "x", false, true);
        let now = Utc::now();
        let mut cur = s;
        for _ in 0..5 {
            cur = cur.accessed(now, now);
        }
        assert_eq!(cur.user_attention_weight, 1.0);
    }

    #[test]
    fn recency_decays_over_a_day() {
        let now = Utc::now();
        let s = score(MemoryKind::Episodic, "x", false, false);
        let half = s.accessed(now - Duration::hours(12), now);
        assert!((half.recency_weight - 0.5).abs() < 1e-6);
        let stale = s.accessed(now - Duration::days(3), now);
        assert_eq!(stale.recency_weight, 0.0);
        assert_eq!(recency_weight(-10.0), 1.0);
    }
}
