pub mod importance;
pub mod keywords;
pub mod maintenance;
pub mod relations;
pub mod search;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod types;
pub mod working;

pub use maintenance::ConsolidationReport;
pub use snapshot::{MemorySnapshot, SnapshotError};
pub use stats::MemoryStats;
pub use store::{lock_store, MemoryStore, SharedStore};
pub use types::{MemoryKind, MemoryRecord, Metadata, Tier};
