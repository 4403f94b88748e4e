// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Exportable document description
//!
//! Built from presets and their responses, then handed to a
//! [`DocumentExporter`](super::DocumentExporter). Bearer tokens never make
//! it into a document.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::ResponseCache;
use crate::http::{HttpMethod, ResponseRecord, StatusClass};
use crate::preset::Preset;

/// Title of the batch document
pub const BATCH_TITLE: &str = "All Saved Requests";

/// A document: one section per request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ExportSection>,
}

/// Request details plus, when available, the response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    pub heading: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSummary>,
}

/// The part of a [`ResponseRecord`] that is exported
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub status: u16,
    pub status_text: String,
    pub time: u64,
    /// Pretty-printed body
    pub body: String,
}

impl ResponseSummary {
    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}

impl From<&ResponseRecord> for ResponseSummary {
    fn from(record: &ResponseRecord) -> Self {
        Self {
            status: record.status,
            status_text: record.status_text.clone(),
            time: record.time,
            body: record.formatted_body(),
        }
    }
}

impl ExportSection {
    fn new(heading: String, preset: &Preset, response: Option<&ResponseRecord>) -> Self {
        Self {
            heading,
            method: preset.method,
            url: preset.url.clone(),
            body: (!preset.body.is_empty()).then(|| preset.body.clone()),
            response: response.map(ResponseSummary::from),
        }
    }
}

impl ExportDocument {
    /// Document for one preset
    pub fn single(preset: &Preset, response: Option<&ResponseRecord>) -> Self {
        Self {
            title: preset.name.clone(),
            generated_at: Utc::now(),
            sections: vec![ExportSection::new(preset.name.clone(), preset, response)],
        }
    }

    /// Aggregated document, sections numbered from 1
    pub fn batch(presets: &[Preset], cache: &ResponseCache) -> Self {
        let sections = presets
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                let response = cache.get(&preset.id);
                ExportSection::new(
                    format!("{}. {}", i + 1, preset.name),
                    preset,
                    response.as_ref(),
                )
            })
            .collect();

        Self {
            title: BATCH_TITLE.to_string(),
            generated_at: Utc::now(),
            sections,
        }
    }

    /// Layout as a flat list of blocks
    pub fn to_blocks(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::Title(self.title.clone()),
            Block::Note(format!(
                "Generated {}",
                self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            )),
            Block::Spacer,
        ];

        let single = self.sections.len() == 1 && self.sections[0].heading == self.title;
        for section in &self.sections {
            if !single {
                blocks.push(Block::Heading(section.heading.clone()));
            }
            blocks.push(Block::Subheading("Request Details".to_string()));
            blocks.push(Block::Field("Method".to_string(), section.method.to_string()));
            blocks.push(Block::Field("URL".to_string(), section.url.clone()));
            if let Some(ref body) = section.body {
                blocks.push(Block::Field("Request Body".to_string(), String::new()));
                blocks.push(Block::Code(body.clone()));
            }

            if let Some(ref response) = section.response {
                blocks.push(Block::Spacer);
                blocks.push(Block::Subheading("Response".to_string()));
                blocks.push(Block::Status {
                    text: format!("Status: {} {}", response.status, response.status_text),
                    class: response.status_class(),
                });
                blocks.push(Block::Field("Time".to_string(), format!("{}ms", response.time)));
                blocks.push(Block::Field("Response Body".to_string(), String::new()));
                if !response.body.is_empty() {
                    blocks.push(Block::Code(response.body.clone()));
                }
            }
            blocks.push(Block::Rule);
        }

        blocks
    }

    /// Standalone HTML page
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str("</head>\n<body style=\"font-family: Arial, sans-serif; color: #333; width: 700px; padding: 20px;\">\n");

        for block in self.to_blocks() {
            match block {
                Block::Title(text) => html.push_str(&format!(
                    "<h1 style=\"color: #2563eb; margin-bottom: 20px;\">{}</h1>\n",
                    escape_html(&text)
                )),
                Block::Heading(text) => html.push_str(&format!(
                    "<h2 style=\"color: #1e40af; margin-bottom: 15px;\">{}</h2>\n",
                    escape_html(&text)
                )),
                Block::Subheading(text) => html.push_str(&format!(
                    "<h3 style=\"font-size: 16px;\">{}</h3>\n",
                    escape_html(&text)
                )),
                Block::Note(text) => html.push_str(&format!(
                    "<p style=\"color: #6b7280; font-size: 12px;\">{}</p>\n",
                    escape_html(&text)
                )),
                Block::Field(label, value) => html.push_str(&format!(
                    "<div><strong>{}:</strong> {}</div>\n",
                    escape_html(&label),
                    escape_html(&value)
                )),
                Block::Code(text) => html.push_str(&format!(
                    "<pre style=\"background: #f1f5f9; padding: 10px; border-radius: 4px; white-space: pre-wrap;\">{}</pre>\n",
                    escape_html(&text)
                )),
                Block::Status { text, class } => html.push_str(&format!(
                    "<div style=\"color: {}; font-weight: bold;\">{}</div>\n",
                    class.css_color(),
                    escape_html(&text)
                )),
                Block::Spacer => html.push_str("<br>\n"),
                Block::Rule => html.push_str("<hr style=\"border: 0; border-top: 1px solid #e5e7eb;\">\n"),
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Layout unit shared by the PDF and HTML renderers
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Note(String),
    /// Label and inline value
    Field(String, String),
    /// Preformatted, monospace
    Code(String),
    Status { text: String, class: StatusClass },
    Spacer,
    Rule,
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
