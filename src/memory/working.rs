//! Working memory: the bounded window of recently touched records.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 20;

/// FIFO of record ids. Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingMemory {
    capacity: usize,
    items: VecDeque<String>,
}

impl Default for WorkingMemory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl WorkingMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `id`, evicting from the front while over capacity.
    pub fn push(&mut self, id: impl Into<String>) {
        self.items.push_back(id.into());
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Replace the window. Only the last `capacity` ids are kept.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.clear();
        for id in ids {
            self.push(id);
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
