// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client and export configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::export::{PageOptions, ReportFormat};
use crate::http::DEFAULT_USER_AGENT;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Transport timeout; none by default
    pub timeout: Option<Duration>,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Headers added to every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            accept_invalid_certs: false,
            proxy: None,
            default_headers: vec![],
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory exported documents are written to
    pub out_dir: PathBuf,
    /// Output format
    pub format: ReportFormat,
    /// Upper bound on waiting for a pending execution; none waits until
    /// it completes
    pub response_wait: Option<Duration>,
    /// Page layout for PDF output
    pub page: PageOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            format: ReportFormat::Pdf,
            response_wait: None,
            page: PageOptions::a4(),
        }
    }
}

impl ExportConfig {
    /// Create a new export config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output directory
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set output format
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Bound the wait for pending executions
    pub fn response_wait(mut self, wait: Duration) -> Self {
        self.response_wait = Some(wait);
        self
    }

    /// Set page layout
    pub fn page(mut self, page: PageOptions) -> Self {
        self.page = page;
        self
    }
}
