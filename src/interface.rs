//! High-level facade for the conversational layer.
//!
//! Translates "remember this conversation turn / fact / skill / emotion" calls
//! into generic [`MemoryStore`](crate::memory::MemoryStore) operations with the
//! right kind and metadata. Holds a [`SharedStore`] handle; it is constructed by
//! the host and passed around explicitly.

use serde::{Deserialize, Serialize};

use crate::config::RetrievalConfig;
use crate::memory::types::{ActionItem, MemoryContext, MemorySource, Sentiment};
use crate::memory::{lock_store, MemoryKind, MemoryRecord, MemoryStats, Metadata, SharedStore};

/// Basic emotions recorded as emotional memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Trust,
    Anticipation,
    Anxiety,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Trust => "trust",
            Self::Anticipation => "anticipation",
            Self::Anxiety => "anxiety",
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match self {
            Self::Joy | Self::Trust | Self::Anticipation => Sentiment::Positive,
            Self::Sadness | Self::Anger | Self::Fear | Self::Anxiety => Sentiment::Negative,
            Self::Surprise => Sentiment::Mixed,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "joy" => Ok(Self::Joy),
            "sadness" => Ok(Self::Sadness),
            "anger" => Ok(Self::Anger),
            "fear" => Ok(Self::Fear),
            "surprise" => Ok(Self::Surprise),
            "trust" => Ok(Self::Trust),
            "anticipation" => Ok(Self::Anticipation),
            "anxiety" => Ok(Self::Anxiety),
            _ => Err(format!("unknown emotion: {s}")),
        }
    }
}

/// Optional annotations on a conversation turn.
#[derive(Debug, Clone, Default)]
pub struct ConversationDetails {
    pub is_emotional: bool,
    pub tags: Vec<String>,
    pub context: MemoryContext,
    pub source_citation: Option<String>,
}

#[derive(Clone)]
pub struct MemoryInterface {
    store: SharedStore,
    recall_limit: usize,
}

impl MemoryInterface {
    pub fn new(store: SharedStore, retrieval: &RetrievalConfig) -> Self {
        Self {
            store,
            recall_limit: retrieval.default_limit,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Remember one conversation turn. Turns spoken by `"user"` count as
    /// user-initiated.
    pub fn remember_conversation(
        &self,
        content: &str,
        role: &str,
        details: ConversationDetails,
    ) -> MemoryRecord {
        let metadata = Metadata {
            source: MemorySource::Conversation,
            user_initiated: role == "user",
            is_emotional: details.is_emotional,
            tags: details.tags.into_iter().collect(),
            context: details.context,
            source_citation: details.source_citation,
            ..Metadata::default()
        };
        lock_store(&self.store).remember(content, MemoryKind::Episodic, metadata)
    }

    /// Remember a fact. Facts with a citation are external data, otherwise
    /// inferred; confidence above 0.8 marks them verified.
    pub fn remember_fact(
        &self,
        fact: &str,
        category: &str,
        confidence: f64,
        source: Option<&str>,
    ) -> MemoryRecord {
        let metadata = Metadata {
            source: if source.is_some() {
                MemorySource::ExternalData
            } else {
                MemorySource::Inference
            },
            user_initiated: false,
            verified: confidence > 0.8,
            source_citation: source.map(str::to_string),
            ..Metadata::default()
        }
        .with_tag(category);
        lock_store(&self.store).remember(fact, MemoryKind::Semantic, metadata)
    }

    pub fn remember_skill(&self, name: &str, category: &str, implementation: &str) -> MemoryRecord {
        let metadata = Metadata::default().with_tag(category).with_tag("skill");
        lock_store(&self.store).remember(
            format!("Skill: {name} - {implementation}"),
            MemoryKind::Procedural,
            metadata,
        )
    }

    /// Record an affective reaction. Intensity is clamped to `[0, 1]`.
    pub fn record_emotional_state(
        &self,
        trigger: &str,
        emotion: Emotion,
        intensity: f64,
        context: &str,
    ) -> MemoryRecord {
        let intensity = intensity.clamp(0.0, 1.0);
        let metadata = Metadata {
            source: MemorySource::SystemObservation,
            user_initiated: false,
            is_emotional: true,
            sentiment: emotion.sentiment(),
            context: MemoryContext {
                activity: (!context.is_empty()).then(|| context.to_string()),
                emotional_state: Some(emotion.as_str().to_string()),
                ..MemoryContext::default()
            },
            ..Metadata::default()
        };
        lock_store(&self.store).remember(
            format!("Emotional response: {emotion} (intensity: {intensity}) triggered by {trigger}"),
            MemoryKind::Emotional,
            metadata,
        )
    }

    /// Attach a follow-up to a memory. Returns `false` for unknown ids.
    pub fn add_action_item(&self, id: &str, item: ActionItem) -> bool {
        lock_store(&self.store).annotate(id, |meta| meta.action_items.push(item))
    }

    /// Mark a follow-up done. Returns `false` if either id is unknown.
    pub fn complete_action_item(&self, id: &str, item_id: &str) -> bool {
        let mut found = false;
        lock_store(&self.store).annotate(id, |meta| {
            if let Some(item) = meta.action_items.iter_mut().find(|i| i.id == item_id) {
                item.completed = true;
                found = true;
            }
        });
        found
    }

    /// Recall with the configured default limit.
    pub fn recall_relevant(&self, query: &str, kind: Option<MemoryKind>) -> Vec<MemoryRecord> {
        lock_store(&self.store).recall(query, kind, self.recall_limit)
    }

    pub fn current_context(&self) -> Vec<MemoryRecord> {
        lock_store(&self.store).get_context()
    }

    /// Bring a record into working memory and count it as accessed.
    pub fn update_context(&self, id: &str) -> Option<MemoryRecord> {
        let mut store = lock_store(&self.store);
        if !store.push_context(id) {
            return None;
        }
        store.access(id)
    }

    pub fn stats(&self) -> MemoryStats {
        lock_store(&self.store).stats()
    }
}
