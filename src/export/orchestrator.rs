// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Single and batch export
//!
//! Both paths make sure a response exists before building the document.
//! Pending executions are awaited through their completion handles, never
//! guessed with a sleep. With [`ExportConfig::response_wait`] set, a
//! request that has not finished in time is exported without its response
//! section; the execution itself keeps running and fills the cache later.

use std::path::PathBuf;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;

use super::document::ExportDocument;
use super::pdf::{create_exporter, DocumentExporter};
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::http::ResponseRecord;
use crate::session::{Initiator, Session};

/// File stem of the batch export
pub const BATCH_FILE_STEM: &str = "all-saved-requests";

type Pending = JoinHandle<Result<Option<ResponseRecord>>>;

/// Builds and exports documents for the presets of a session
pub struct Orchestrator {
    session: Session,
    exporter: Box<dyn DocumentExporter>,
    response_wait: Option<Duration>,
}

impl Orchestrator {
    /// Create an orchestrator using the exporter configured in `config`
    pub fn new(session: Session, config: &ExportConfig) -> Self {
        Self::with_exporter(session, create_exporter(config), config.response_wait)
    }

    /// Create an orchestrator with a specific exporter
    pub fn with_exporter(
        session: Session,
        exporter: Box<dyn DocumentExporter>,
        response_wait: Option<Duration>,
    ) -> Self {
        Self {
            session,
            exporter,
            response_wait,
        }
    }

    /// Export one preset to `<name>-request.<ext>`
    pub async fn export_preset(&self, id: &str) -> Result<PathBuf> {
        let document = self.preset_document(id).await?;
        self.exporter
            .export(&document, &format!("{}-request", document.title))
    }

    /// Export every preset to one document. `Ok(None)` when there are no
    /// presets.
    pub async fn export_all(&self) -> Result<Option<PathBuf>> {
        match self.batch_document().await? {
            Some(document) => self.exporter.export(&document, BATCH_FILE_STEM).map(Some),
            None => Ok(None),
        }
    }

    /// Document for one preset, executing it first if it has no response
    pub async fn preset_document(&self, id: &str) -> Result<ExportDocument> {
        let preset = self
            .session
            .preset(id)
            .ok_or_else(|| Error::preset_not_found(id))?;

        let response = match self.session.cached_response(id) {
            Some(record) => Some(record),
            None => match self.session.spawn_load_and_run(id) {
                Some(handle) => self.settle(id, handle).await,
                None => None,
            },
        };

        Ok(ExportDocument::single(&preset, response.as_ref()))
    }

    /// Aggregated document for all presets, executing those without a
    /// cached response concurrently
    pub async fn batch_document(&self) -> Result<Option<ExportDocument>> {
        let presets = self.session.presets();
        if presets.is_empty() {
            return Ok(None);
        }

        let pending: Vec<(String, Pending)> = presets
            .iter()
            .filter(|p| !self.session.cache().contains(&p.id))
            .map(|p| {
                let handle = self
                    .session
                    .spawn_send(p.params(), Initiator::Preset(p.id.clone()));
                (p.id.clone(), handle)
            })
            .collect();

        tracing::info!(
            presets = presets.len(),
            pending = pending.len(),
            "Preparing batch export"
        );

        join_all(
            pending
                .into_iter()
                .map(|(id, handle)| async move { self.settle(&id, handle).await }),
        )
        .await;

        Ok(Some(ExportDocument::batch(&presets, self.session.cache())))
    }

    /// Wait for one execution. Any outcome other than a record degrades to
    /// `None` and is only logged.
    async fn settle(&self, id: &str, handle: Pending) -> Option<ResponseRecord> {
        let joined = match self.response_wait {
            Some(wait) => match tokio::time::timeout(wait, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(
                        preset = %id,
                        wait_ms = wait.as_millis() as u64,
                        "Response not ready, exporting request details only"
                    );
                    return None;
                }
            },
            None => handle.await,
        };

        match joined {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                tracing::warn!(preset = %id, error = %e, "Request not sent, exporting request details only");
                None
            }
            Err(e) => {
                tracing::warn!(preset = %id, error = %e, "Execution task failed");
                None
            }
        }
    }
}
