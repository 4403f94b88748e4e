// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session state
//!
//! Ties the executor, the preset store and the response cache together and
//! holds the interactive form. Every execution outcome is kept per
//! [`Initiator`], so a manual send and a preset send never clobber each
//! other's result. The most recent outcome is still available as the
//! current response.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::cache::ResponseCache;
use crate::error::Result;
use crate::http::{RequestExecutor, RequestParams, ResponseRecord, Transport};
use crate::preset::{NewPreset, Preset, PresetStore};
use crate::storage::KeyValueStore;

/// Who triggered an execution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Initiator {
    /// The interactive form
    Manual,
    /// A saved preset, by identifier
    Preset(String),
}

impl fmt::Display for Initiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initiator::Manual => f.write_str("manual"),
            Initiator::Preset(id) => write!(f, "preset:{}", id),
        }
    }
}

struct Inner {
    executor: RequestExecutor,
    presets: RwLock<PresetStore>,
    cache: ResponseCache,
    form: RwLock<RequestParams>,
    current: RwLock<Option<(Initiator, ResponseRecord)>>,
    responses: RwLock<HashMap<Initiator, ResponseRecord>>,
}

/// Shared application state. Clones share everything.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Create a session, loading presets from `store`
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                executor: RequestExecutor::new(transport),
                presets: RwLock::new(PresetStore::load(store)),
                cache: ResponseCache::new(),
                form: RwLock::new(RequestParams::default()),
                current: RwLock::new(None),
                responses: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Current form fields
    pub fn form(&self) -> RequestParams {
        self.inner.form.read().clone()
    }

    /// Replace the form fields
    pub fn set_form(&self, params: RequestParams) {
        *self.inner.form.write() = params;
    }

    /// Execute `params` on behalf of `initiator` and record the outcome
    pub async fn send(
        &self,
        params: RequestParams,
        initiator: Initiator,
    ) -> Result<Option<ResponseRecord>> {
        let record = self.inner.executor.execute(&params).await?;
        if let Some(ref record) = record {
            self.record(initiator, record.clone());
        }
        Ok(record)
    }

    /// Execute the current form
    pub async fn send_form(&self) -> Result<Option<ResponseRecord>> {
        self.send(self.form(), Initiator::Manual).await
    }

    /// Execute in the background. The handle resolves when the execution
    /// has completed and its outcome is recorded; dropping the handle does
    /// not stop it.
    pub fn spawn_send(
        &self,
        params: RequestParams,
        initiator: Initiator,
    ) -> JoinHandle<Result<Option<ResponseRecord>>> {
        let session = self.clone();
        tokio::spawn(async move { session.send(params, initiator).await })
    }

    /// Copy a preset into the form and execute it. `Ok(None)` for an
    /// unknown id.
    pub async fn load_and_run(&self, id: &str) -> Result<Option<ResponseRecord>> {
        match self.load(id) {
            Some(preset) => {
                self.send(preset.params(), Initiator::Preset(preset.id))
                    .await
            }
            None => Ok(None),
        }
    }

    /// Background variant of [`load_and_run`](Self::load_and_run)
    pub fn spawn_load_and_run(
        &self,
        id: &str,
    ) -> Option<JoinHandle<Result<Option<ResponseRecord>>>> {
        let preset = self.load(id)?;
        Some(self.spawn_send(preset.params(), Initiator::Preset(preset.id)))
    }

    fn load(&self, id: &str) -> Option<Preset> {
        let preset = self.preset(id)?;
        self.set_form(preset.params());
        Some(preset)
    }

    /// Save the current form as a named preset
    pub fn save_form(&self, name: impl Into<String>) -> Result<Option<Preset>> {
        let new = NewPreset::new(name, self.form());
        self.inner.presets.write().save(new)
    }

    /// Delete a preset and forget its responses
    pub fn delete_preset(&self, id: &str) -> Result<bool> {
        let removed = self.inner.presets.write().delete(id)?;
        if removed {
            self.inner.cache.remove(id);
            self.inner
                .responses
                .write()
                .remove(&Initiator::Preset(id.to_string()));
        }
        Ok(removed)
    }

    /// All presets in insertion order
    pub fn presets(&self) -> Vec<Preset> {
        self.inner.presets.read().list().to_vec()
    }

    /// Find a preset by identifier
    pub fn preset(&self, id: &str) -> Option<Preset> {
        self.inner.presets.read().get(id).cloned()
    }

    /// Most recent outcome of any execution
    pub fn current_response(&self) -> Option<ResponseRecord> {
        self.inner.current.read().as_ref().map(|(_, r)| r.clone())
    }

    /// Initiator of the current response
    pub fn current_initiator(&self) -> Option<Initiator> {
        self.inner.current.read().as_ref().map(|(i, _)| i.clone())
    }

    /// Most recent outcome for one initiator
    pub fn response_for(&self, initiator: &Initiator) -> Option<ResponseRecord> {
        self.inner.responses.read().get(initiator).cloned()
    }

    /// Cached response of a preset
    pub fn cached_response(&self, id: &str) -> Option<ResponseRecord> {
        self.inner.cache.get(id)
    }

    /// The response cache
    pub fn cache(&self) -> &ResponseCache {
        &self.inner.cache
    }

    fn record(&self, initiator: Initiator, record: ResponseRecord) {
        // Held across the inserts: a concurrent delete either evicts these
        // entries or runs first.
        let presets = self.inner.presets.read();
        match initiator {
            Initiator::Preset(ref id) if presets.get(id).is_none() => {
                tracing::debug!(preset = %id, "Preset deleted while running, response not kept");
            }
            Initiator::Preset(ref id) => {
                self.inner.cache.insert(id.clone(), record.clone());
                self.inner
                    .responses
                    .write()
                    .insert(initiator.clone(), record.clone());
            }
            Initiator::Manual => {
                self.inner
                    .responses
                    .write()
                    .insert(initiator.clone(), record.clone());
            }
        }
        drop(presets);
        *self.inner.current.write() = Some((initiator, record));
    }
}
