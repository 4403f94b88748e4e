// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer
//!
//! Request composition, the transport seam, and the executor that turns
//! every outcome into a [`ResponseRecord`].

mod client;
mod executor;
mod request;
mod response;
#[cfg(test)]
pub(crate) mod stub;

pub use client::{ReqwestTransport, Transport, TransportFailure, TransportResponse};
pub use executor::RequestExecutor;
pub use request::{HttpMethod, OutboundRequest, RequestParams};
pub use response::{format_body, parse_body, ResponseRecord, StatusClass};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("presto/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const AUTHORIZATION: &str = "authorization";
}
