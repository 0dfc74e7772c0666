//! Core memory type definitions.
//!
//! Defines [`MemoryKind`] (the five cognitive memory categories), [`Tier`] (the
//! consolidation state machine), [`Metadata`] (explicit annotations on a record),
//! [`Relationship`] (graph edges between records) and [`MemoryRecord`] itself.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::importance::ImportanceScore;

/// The five cognitive memory kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Conversations, experiences, events.
    Episodic,
    /// Facts, knowledge, learned patterns.
    Semantic,
    /// Skills, workflows, how-to. Always a consolidation candidate.
    Procedural,
    /// Current context and active tasks.
    Working,
    /// Affective state, sentiment, user wellbeing.
    Emotional,
}

impl MemoryKind {
    pub const ALL: [MemoryKind; 5] = [
        Self::Episodic,
        Self::Semantic,
        Self::Procedural,
        Self::Working,
        Self::Emotional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Episodic => "episodic",
            Self::Semantic => "semantic",
            Self::Procedural => "procedural",
            Self::Working => "working",
            Self::Emotional => "emotional",
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "episodic" => Ok(Self::Episodic),
            "semantic" => Ok(Self::Semantic),
            "procedural" => Ok(Self::Procedural),
            "working" => Ok(Self::Working),
            "emotional" => Ok(Self::Emotional),
            _ => Err(format!("unknown memory kind: {s}")),
        }
    }
}

/// Consolidation state of a record.
///
/// Transitions only happen inside a consolidation pass:
/// `ShortTerm → Consolidating → LongTerm → Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    ShortTerm,
    Consolidating,
    LongTerm,
    /// Terminal. Archived records stay in the long-term index and remain retrievable.
    Archived,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::Consolidating => "consolidating",
            Self::LongTerm => "long_term",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    #[default]
    Conversation,
    UserInput,
    SystemObservation,
    ExternalData,
    Inference,
    Consolidation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
    Mixed,
}

/// Situational fields captured alongside an observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContext {
    pub device: Option<String>,
    pub location: Option<String>,
    pub activity: Option<String>,
    pub time_of_day: Option<String>,
    pub emotional_state: Option<String>,
}

/// A pending follow-up attached to a memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub due: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Id of another memory this item refers to.
    pub related_to: Option<String>,
}

impl ActionItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            description: description.into(),
            due: None,
            completed: false,
            related_to: None,
        }
    }
}

/// Structured annotations on a memory record.
///
/// Caller-supplied extension data goes into `tags`; there is no open-ended map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub source: MemorySource,
    pub user_initiated: bool,
    pub is_emotional: bool,
    pub sentiment: Sentiment,
    pub tags: BTreeSet<String>,
    pub context: MemoryContext,
    pub action_items: Vec<ActionItem>,
    pub verified: bool,
    pub source_citation: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            source: MemorySource::Conversation,
            user_initiated: true,
            is_emotional: false,
            sentiment: Sentiment::Neutral,
            tags: BTreeSet::new(),
            context: MemoryContext::default(),
            action_items: Vec::new(),
            verified: false,
            source_citation: None,
        }
    }
}

impl Metadata {
    /// Add a tag, builder style.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// Edge label between two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Causes,
    CausedBy,
    RelatesTo,
    Contradicts,
    Supports,
    PartOf,
    Requires,
    Triggers,
    Remembers,
    LearnsFrom,
}

/// A directed, weighted edge from the owning record to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    /// Id of the target record. May dangle; unresolved targets are tolerated.
    pub target: String,
    pub kind: RelationshipKind,
    /// In `[0.0, 1.0]`; only ever incremented.
    pub strength: f64,
    /// Recorded but not acted upon: no reverse edge is created or traversed.
    pub bidirectional: bool,
}

impl Relationship {
    pub fn new(target: impl Into<String>, kind: RelationshipKind, strength: f64, bidirectional: bool) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            target: target.into(),
            kind,
            strength: strength.clamp(0.0, 1.0),
            bidirectional,
        }
    }
}

/// A memory record, the atomic unit of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// UUID v7 (time-sortable), unique across the whole store.
    pub id: String,
    pub kind: MemoryKind,
    pub content: String,
    /// Never populated by the engine; carried through snapshots untouched.
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u32,
    pub importance: ImportanceScore,
    pub metadata: Metadata,
    pub relationships: Vec<Relationship>,
    pub tier: Tier,
    /// Condensed form produced when the record was promoted to long-term.
    pub summary: Option<String>,
}

impl MemoryRecord {
    /// Build a fresh short-term record with its initial importance score.
    pub fn new(content: impl Into<String>, kind: MemoryKind, metadata: Metadata) -> Self {
        let content = content.into();
        let now = Utc::now();
        let importance = ImportanceScore::initial(kind, &content, &metadata);
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            kind,
            content,
            embedding: None,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            importance,
            metadata,
            relationships: Vec::new(),
            tier: Tier::ShortTerm,
            summary: None,
        }
    }

    /// Record one access at `now`: bumps the counter and rescores importance.
    pub fn access(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now;
        self.access_count += 1;
        self.importance = self.importance.accessed(self.last_accessed, now);
    }

    /// Shorthand for `importance.total_score()`.
    pub fn total_score(&self) -> f64 {
        self.importance.total_score()
    }

    /// True if an outgoing edge of `kind` to `target` already exists.
    pub fn has_edge(&self, target: &str, kind: RelationshipKind) -> bool {
        self.relationships
            .iter()
            .any(|r| r.target == target && r.kind == kind)
    }
}
