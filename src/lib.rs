// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Presto - HTTP Request Workbench
//!
//! Compose HTTP requests, send them, keep named presets and export requests
//! together with their responses as PDF, HTML or JSON reports.
//!
//! ## Features
//!
//! - GET, POST, PUT, DELETE and PATCH with optional bearer token and JSON body
//! - Normalized responses: failures carry status, reason and error body
//! - Presets persisted to a key-value store
//! - Per-preset response cache
//! - Single and batch report export
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use presto::{ExportConfig, FileStore, HttpMethod, Orchestrator, RequestParams, ReqwestTransport, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(
//!         Arc::new(ReqwestTransport::new()?),
//!         Arc::new(FileStore::new(".presto")),
//!     );
//!
//!     session.set_form(RequestParams::new(HttpMethod::Get, "https://api.example.com/users"));
//!     if let Some(response) = session.send_form().await? {
//!         println!("{} {} ({}ms)", response.status, response.status_text, response.time);
//!     }
//!
//!     let preset = session.save_form("Get Users")?;
//!     if let Some(preset) = preset {
//!         let orchestrator = Orchestrator::new(session.clone(), &ExportConfig::default());
//!         let path = orchestrator.export_preset(&preset.id).await?;
//!         println!("Exported to {}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod preset;
pub mod session;
pub mod storage;

// Re-exports for convenience

// Configuration
pub use config::{ClientConfig, ExportConfig};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{
    HttpMethod, OutboundRequest, RequestExecutor, RequestParams, ReqwestTransport,
    ResponseRecord, StatusClass, Transport, TransportFailure, TransportResponse,
};

// Presets and storage
pub use preset::{NewPreset, Preset, PresetStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Session and cache
pub use cache::ResponseCache;
pub use session::{Initiator, Session};

// Export
pub use export::{DocumentExporter, ExportDocument, Orchestrator, PageOptions, ReportFormat};

/// Presto version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
