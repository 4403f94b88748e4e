// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized response record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one execution, success or failure alike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// Status code, 0 when the transport failed without one
    pub status: u16,
    /// Status text ("Error" when the failure carried none)
    pub status_text: String,
    /// Parsed JSON body, or the raw text when it was not JSON
    pub body: Value,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Elapsed time in milliseconds
    pub time: u64,
}

impl ResponseRecord {
    /// Visual class of the status code
    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status_class() == StatusClass::Success
    }

    /// Check if the transport itself failed
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as display text: pretty JSON for structured bodies, the
    /// string itself for text bodies, empty for no body
    pub fn formatted_body(&self) -> String {
        format_body(&self.body)
    }
}

/// Format a body value for display
pub fn format_body(body: &Value) -> String {
    match body {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Parse a raw body: JSON when possible, text otherwise, null when empty
pub fn parse_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Status color cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx, green
    Success,
    /// 3xx, blue
    Redirect,
    /// 4xx, orange
    ClientError,
    /// Anything else, red
    Error,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            _ => StatusClass::Error,
        }
    }

    /// RGB color, 0..=255 per channel
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            StatusClass::Success => (22, 163, 74),
            StatusClass::Redirect => (37, 99, 235),
            StatusClass::ClientError => (234, 88, 12),
            StatusClass::Error => (220, 38, 38),
        }
    }

    /// CSS hex color
    pub fn css_color(&self) -> String {
        let (r, g, b) = self.color();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}
