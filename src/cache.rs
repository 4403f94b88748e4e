// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory response cache: preset id to its latest record. Never persisted.

use std::sync::Arc;

use dashmap::DashMap;

use crate::http::ResponseRecord;

/// Latest response per preset identifier
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<DashMap<String, ResponseRecord>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest record for a preset
    pub fn get(&self, id: &str) -> Option<ResponseRecord> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Overwrite the record for a preset
    pub fn insert(&self, id: impl Into<String>, record: ResponseRecord) {
        self.entries.insert(id.into(), record);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<ResponseRecord> {
        self.entries.remove(id).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
