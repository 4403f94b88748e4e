// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request executor
//!
//! Single normalization point: every caller gets the same
//! [`ResponseRecord`] shape whether the transport succeeded or failed.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use super::client::{Transport, TransportFailure, TransportResponse};
use super::request::RequestParams;
use super::response::ResponseRecord;
use crate::error::Result;

/// Validates parameters, dispatches them and normalizes the outcome
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Create an executor on top of a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute one request.
    ///
    /// `Ok(None)` when the URL is empty; `Err` only for a malformed JSON
    /// body. In both cases nothing reaches the transport.
    pub async fn execute(&self, params: &RequestParams) -> Result<Option<ResponseRecord>> {
        let request = match params.prepare() {
            Ok(Some(request)) => request,
            Ok(None) => {
                tracing::debug!("Empty URL, nothing to send");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(method = %params.method, url = %params.url, error = %e, "Request rejected");
                return Err(e);
            }
        };

        tracing::info!(method = %request.method, url = %request.url, "Request");

        let start = Instant::now();
        let outcome = self.transport.send(request).await;
        let time = start.elapsed().as_millis() as u64;

        let record = match outcome {
            Ok(response) => from_response(response, time),
            Err(failure) => {
                tracing::debug!(message = %failure.message, "Transport failure");
                from_failure(failure, time)
            }
        };

        tracing::info!(
            url = %params.url,
            status = record.status,
            time_ms = record.time,
            "Response"
        );

        Ok(Some(record))
    }
}

fn from_response(response: TransportResponse, time: u64) -> ResponseRecord {
    ResponseRecord {
        status: response.status,
        status_text: response.status_text,
        body: response.body,
        headers: response.headers,
        time,
    }
}

fn from_failure(failure: TransportFailure, time: u64) -> ResponseRecord {
    ResponseRecord {
        status: failure.status.unwrap_or(0),
        status_text: failure
            .status_text
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Error".to_string()),
        body: failure
            .error_body
            .unwrap_or(Value::String(failure.message)),
        headers: failure.headers.unwrap_or_default(),
        time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::stub::StubTransport;
    use crate::http::HttpMethod;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn executor(stub: Arc<StubTransport>) -> RequestExecutor {
        RequestExecutor::new(stub)
    }

    #[tokio::test]
    async fn test_success_is_verbatim() {
        let stub = Arc::new(StubTransport::new());
        stub.reply("https://api.example.com/ok", 200, json!({"a": 1}));

        let record = executor(stub.clone())
            .execute(&RequestParams::new(HttpMethod::Get, "https://api.example.com/ok"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, 200);
        assert_eq!(record.status_text, "OK");
        assert_eq!(record.body, json!({"a": 1}));
        assert!(record.headers.is_empty());
        assert_eq!(stub.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_sends_nothing() {
        let stub = Arc::new(StubTransport::new());
        let params = RequestParams::new(HttpMethod::Post, "https://api.example.com/x").body("not json");

        let err = executor(stub.clone()).execute(&params).await.unwrap_err();

        assert!(matches!(err, Error::InvalidJson(_)));
        assert_eq!(stub.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_url_sends_nothing() {
        let stub = Arc::new(StubTransport::new());
        let res = executor(stub.clone())
            .execute(&RequestParams::new(HttpMethod::Get, ""))
            .await
            .unwrap();

        assert!(res.is_none());
        assert_eq!(stub.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_defaults() {
        let stub = Arc::new(StubTransport::new());
        stub.fail(
            "https://down.example.com",
            TransportFailure::network("connection refused"),
        );

        let record = executor(stub)
            .execute(&RequestParams::new(HttpMethod::Get, "https://down.example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, 0);
        assert_eq!(record.status_text, "Error");
        assert_eq!(record.body, json!("connection refused"));
        assert!(record.headers.is_empty());
        assert!(record.is_transport_failure());
    }

    #[tokio::test]
    async fn test_failure_status_preserved() {
        let stub = Arc::new(StubTransport::new());
        let mut headers = BTreeMap::new();
        headers.insert("x-request-id".to_string(), "r1".to_string());
        stub.fail(
            "https://api.example.com/secret",
            TransportFailure {
                status: Some(403),
                status_text: Some("Forbidden".to_string()),
                error_body: Some(json!({"error": "denied"})),
                headers: Some(headers),
                message: "Http failure response".to_string(),
            },
        );

        let record = executor(stub)
            .execute(&RequestParams::new(
                HttpMethod::Delete,
                "https://api.example.com/secret",
            ))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, 403);
        assert_eq!(record.status_text, "Forbidden");
        assert_eq!(record.body, json!({"error": "denied"}));
        assert_eq!(record.header("X-Request-Id"), Some("r1"));
    }

    #[tokio::test]
    async fn test_outbound_shape_reaches_transport() {
        let stub = Arc::new(StubTransport::new());
        stub.reply("https://api.example.com/x", 201, Value::Null);
        let params = RequestParams::new(HttpMethod::Put, "https://api.example.com/x")
            .bearer_token("tok")
            .body(r#"{"n":2}"#);

        executor(stub.clone()).execute(&params).await.unwrap();

        let sent = stub.sent.lock();
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].body, Some(json!({"n": 2})));
    }

    #[tokio::test]
    async fn test_time_covers_transport_latency() {
        let stub = Arc::new(StubTransport::new());
        stub.reply("https://slow.example.com", 200, json!("done"));
        stub.delay("https://slow.example.com", Duration::from_millis(120));

        let record = executor(stub)
            .execute(&RequestParams::new(HttpMethod::Get, "https://slow.example.com"))
            .await
            .unwrap()
            .unwrap();

        assert!(record.time >= 120, "time was {}ms", record.time);
    }

    #[tokio::test]
    async fn test_failure_time_measured() {
        let stub = Arc::new(StubTransport::new());
        stub.fail("https://down.example.com", TransportFailure::network("timeout"));
        stub.delay("https://down.example.com", Duration::from_millis(60));

        let record = executor(stub)
            .execute(&RequestParams::new(HttpMethod::Get, "https://down.example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, 0);
        assert!(record.time >= 60, "time was {}ms", record.time);
    }
}
