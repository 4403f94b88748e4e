// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types
//!
//! [`RequestParams`] is what the user composes. [`OutboundRequest`] is what
//! actually goes to the transport after validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::headers;
use crate::error::{Error, Result};

/// HTTP methods offered by the request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// All methods, in form order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether a configured body is sent with this method
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Method(s.to_string()))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Parameters of one execution: the form fields or a preset's copy of them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub bearer_token: String,
    /// Raw body text, only required to be JSON when sent
    #[serde(default)]
    pub body: String,
}

impl RequestParams {
    /// Create params for a method and URL
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = token.into();
        self
    }

    /// Set the raw body text
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Validate and turn into the request handed to the transport.
    ///
    /// Returns `Ok(None)` when the URL is empty: nothing is sent in that
    /// case. A non-empty body must be valid JSON even for methods that do
    /// not carry it.
    pub fn prepare(&self) -> Result<Option<OutboundRequest>> {
        if self.url.is_empty() {
            return Ok(None);
        }

        let parsed = if self.body.is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(&self.body).map_err(Error::invalid_json)?)
        };

        let mut headers = vec![(
            headers::CONTENT_TYPE.to_string(),
            "application/json".to_string(),
        )];
        if !self.bearer_token.is_empty() {
            headers.push((
                headers::AUTHORIZATION.to_string(),
                format!("Bearer {}", self.bearer_token),
            ));
        }

        Ok(Some(OutboundRequest {
            method: self.method,
            url: self.url.clone(),
            headers,
            body: if self.method.carries_body() { parsed } else { None },
        }))
    }
}

/// A validated request, ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl OutboundRequest {
    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
