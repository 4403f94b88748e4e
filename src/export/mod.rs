// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Report export
//!
//! Turns presets and their responses into PDF, HTML or JSON documents.

mod document;
mod orchestrator;
mod pdf;

pub use document::{Block, ExportDocument, ExportSection, ResponseSummary, BATCH_TITLE};
pub use orchestrator::{Orchestrator, BATCH_FILE_STEM};
#[cfg(feature = "pdf")]
pub use pdf::PdfExporter;
pub use pdf::{
    create_exporter, layout, sanitize_file_stem, DocumentExporter, FontFace, HtmlExporter,
    JsonExporter, NullExporter, PageOptions, PlacedLine, ReportFormat,
};
