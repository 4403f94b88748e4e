// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Saved request presets
//!
//! The whole sequence is persisted as one JSON array under
//! [`PRESETS_KEY`] after every change. Presets are never edited in place.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, Result};
use crate::http::{HttpMethod, RequestParams};
use crate::storage::KeyValueStore;

/// Storage key of the preset sequence
pub const PRESETS_KEY: &str = "httpClientRequests";

/// A named, reusable request template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Creation timestamp in milliseconds, as text
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub bearer_token: String,
    #[serde(default)]
    pub body: String,
}

impl Preset {
    /// Request parameters carried by this preset
    pub fn params(&self) -> RequestParams {
        RequestParams {
            method: self.method,
            url: self.url.clone(),
            bearer_token: self.bearer_token.clone(),
            body: self.body.clone(),
        }
    }
}

/// Input of [`PresetStore::save`]
#[derive(Debug, Clone, Default)]
pub struct NewPreset {
    pub name: String,
    pub params: RequestParams,
}

impl NewPreset {
    pub fn new(name: impl Into<String>, params: RequestParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Ordered collection of presets backed by a [`KeyValueStore`]
pub struct PresetStore {
    store: Arc<dyn KeyValueStore>,
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Load the persisted sequence. Absent or unreadable data yields an
    /// empty store.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let presets = read_presets(store.as_ref());
        Self { store, presets }
    }

    /// Re-read the sequence from persistence
    pub fn reload(&mut self) {
        self.presets = read_presets(self.store.as_ref());
    }

    /// All presets in insertion order
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    /// Find a preset by identifier
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Append a new preset and persist.
    ///
    /// `Ok(None)` without any change when the name or URL is empty. On a
    /// persistence failure the in-memory sequence is left untouched.
    pub fn save(&mut self, new: NewPreset) -> Result<Option<Preset>> {
        if new.name.is_empty() || new.params.url.is_empty() {
            tracing::debug!("Preset needs a name and a URL, not saved");
            return Ok(None);
        }

        let preset = Preset {
            id: self.next_id(),
            name: new.name,
            method: new.params.method,
            url: new.params.url,
            bearer_token: new.params.bearer_token,
            body: new.params.body,
        };

        let mut updated = self.presets.clone();
        updated.push(preset.clone());
        self.persist(&updated)?;
        self.presets = updated;

        tracing::info!(preset = %preset.id, name = %preset.name, "Preset saved");
        Ok(Some(preset))
    }

    /// Remove the preset with `id` and persist. Returns whether one was
    /// removed; unknown ids are not an error.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let updated: Vec<Preset> = self.presets.iter().filter(|p| p.id != id).cloned().collect();
        self.persist(&updated)?;
        self.presets = updated;

        tracing::info!(preset = %id, "Preset deleted");
        Ok(true)
    }

    fn persist(&self, presets: &[Preset]) -> Result<()> {
        let serialized = serde_json::to_string(presets)?;
        self.store
            .set(PRESETS_KEY, &serialized)
            .context("Failed to save presets")
    }

    /// Current time in milliseconds, bumped past every existing numeric id.
    /// Never returns an id already in the store.
    fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let last = self
            .presets
            .iter()
            .filter_map(|p| p.id.parse::<i64>().ok())
            .max();

        let mut id = match last.and_then(|last| last.checked_add(1)) {
            Some(next) => now.max(next),
            None => now,
        };
        while self.get(&id.to_string()).is_some() {
            id = id.wrapping_add(1);
        }
        id.to_string()
    }
}

fn read_presets(store: &dyn KeyValueStore) -> Vec<Preset> {
    let raw = match store.get(PRESETS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load saved requests");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(presets) => presets,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load saved requests");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryStore;

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::storage("device not ready"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("device not ready"))
        }
    }

    fn new_store() -> (Arc<MemoryStore>, PresetStore) {
        let backing = Arc::new(MemoryStore::new());
        let store = PresetStore::load(backing.clone());
        (backing, store)
    }

    fn get_users() -> NewPreset {
        NewPreset::new(
            "Get Users",
            RequestParams::new(HttpMethod::Get, "https://api.example.com/users"),
        )
    }

    #[test]
    fn test_save_and_list() {
        let (_, mut store) = new_store();
        store.save(get_users()).unwrap().unwrap();

        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Get Users");
        assert_eq!(list[0].method, HttpMethod::Get);
        assert_eq!(list[0].url, "https://api.example.com/users");
        assert!(!list[0].id.is_empty());
    }

    #[test]
    fn test_save_requires_name_and_url() {
        let (backing, mut store) = new_store();

        let no_name = NewPreset::new("", RequestParams::new(HttpMethod::Get, "https://x"));
        let no_url = NewPreset::new("x", RequestParams::new(HttpMethod::Get, ""));
        assert!(store.save(no_name).unwrap().is_none());
        assert!(store.save(no_url).unwrap().is_none());

        assert!(store.is_empty());
        assert_eq!(backing.get(PRESETS_KEY).unwrap(), None);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let (_, mut store) = new_store();
        for _ in 0..5 {
            store.save(get_users()).unwrap();
        }

        let ids: Vec<i64> = store.list().iter().map(|p| p.id.parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_reload_round_trip() {
        let (backing, mut store) = new_store();
        store.save(get_users()).unwrap();
        store
            .save(NewPreset::new(
                "Create User",
                RequestParams::new(HttpMethod::Post, "https://api.example.com/users")
                    .bearer_token("t0k")
                    .body(r#"{"name":"ada"}"#),
            ))
            .unwrap();

        let reloaded = PresetStore::load(backing);
        assert_eq!(reloaded.list(), store.list());
    }

    #[test]
    fn test_delete() {
        let (backing, mut store) = new_store();
        let first = store.save(get_users()).unwrap().unwrap();
        let second = store.save(get_users()).unwrap().unwrap();

        assert!(store.delete(&first.id).unwrap());
        assert_eq!(store.list(), &[second.clone()]);

        store.reload();
        assert_eq!(store.list(), &[second]);
        assert!(backing.get(PRESETS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_, mut store) = new_store();
        store.save(get_users()).unwrap();
        let before = store.list().to_vec();

        assert!(!store.delete("does-not-exist").unwrap());
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(PRESETS_KEY, "{not json").unwrap();

        let store = PresetStore::load(backing);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reads_existing_format() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                PRESETS_KEY,
                r#"[{"id":"1700000000000","name":"Ping","method":"GET","url":"https://x/ping","bearerToken":"","body":""}]"#,
            )
            .unwrap();

        let mut store = PresetStore::load(backing);
        assert_eq!(store.list()[0].name, "Ping");

        let next = store.save(get_users()).unwrap().unwrap();
        assert!(next.id.parse::<i64>().unwrap() > 1_700_000_000_000);
    }

    #[test]
    fn test_unreadable_storage_is_empty() {
        let mut store = PresetStore::load(Arc::new(BrokenStore));
        assert!(store.is_empty());

        store.reload();
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let mut store = PresetStore::load(Arc::new(BrokenStore));

        let err = store.save(get_users()).unwrap_err();

        assert!(err.is_storage());
        assert_eq!(
            err.to_string(),
            "Storage error: Failed to save presets: device not ready"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_id_unique_at_numeric_limit() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                PRESETS_KEY,
                r#"[{"id":"9223372036854775807","name":"Last","method":"GET","url":"https://x/last"}]"#,
            )
            .unwrap();
        let mut store = PresetStore::load(backing);

        let first = store.save(get_users()).unwrap().unwrap();
        let second = store.save(get_users()).unwrap().unwrap();

        assert_ne!(first.id, "9223372036854775807");
        assert_ne!(second.id, "9223372036854775807");
        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 3);
    }
}
