//! Tiered, self-maintaining memory for conversational agents.
//!
//! Observations are remembered as typed records, scored for importance, linked into
//! a relationship graph by keyword overlap, and periodically consolidated from
//! short-term into long-term storage. Stale, unimportant long-term memories are
//! archived in place rather than deleted.
//!
//! | Kind | Purpose | Base importance |
//! |------|---------|-----------------|
//! | **Episodic** | Conversations, events | 0.6 |
//! | **Semantic** | Facts, knowledge | 0.5 (0.8 if flagged critical/important) |
//! | **Procedural** | Skills, workflows | 0.7 |
//! | **Working** | Active context, tasks | 0.8 |
//! | **Emotional** | Affective state | 0.9 |
//!
//! # Tiers
//!
//! `short_term → consolidating → long_term → archived`. Records are owned by a single
//! arena; tiers are ordered id indexes, so a record is never stored twice.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`memory`]: Core engine: store, importance, relations, recall, consolidation, snapshots
//! - [`scheduler`]: Background consolidation on a tokio interval
//! - [`interface`]: Conversation/fact/skill/emotion facade over a shared store

pub mod config;
pub mod interface;
pub mod memory;
pub mod scheduler;
