use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct MirrorEntry {
    data: Value,
    stored_at: Instant,
}

/// Last-known copies of read endpoints, served only when the backend is unreachable.
#[derive(Debug, Default)]
pub struct OfflineMirror {
    entries: DashMap<String, MirrorEntry>,
}

impl OfflineMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, key: &str, data: Value) {
        self.entries.insert(
            key.to_string(),
            MirrorEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    pub fn age(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|entry| entry.stored_at.elapsed())
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
