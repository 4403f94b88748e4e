// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam and its reqwest implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use super::request::OutboundRequest;
use super::response::parse_body;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// A response the transport considers successful
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
    pub headers: BTreeMap<String, String>,
}

/// A failed exchange: network error or non-2xx status
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportFailure {
    /// Status code if the server answered at all
    pub status: Option<u16>,
    pub status_text: Option<String>,
    /// Structured error body sent by the server
    pub error_body: Option<Value>,
    pub headers: Option<BTreeMap<String, String>>,
    /// Human-readable failure message
    pub message: String,
}

impl TransportFailure {
    /// Failure without any server answer
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Issues one HTTP request and reports its outcome.
///
/// Implementations never retry and never cancel.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::Config(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::Config(format!("Invalid header value: {}", e)))?;
            default_headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(default_headers);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get transport configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| TransportFailure::network(format!("Invalid URL {}: {}", request.url, e)))?;
        let mut builder = self.client.request(request.method.into(), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::network(e.to_string()))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let headers = collect_headers(response.headers());
        let raw = response
            .text()
            .await
            .map_err(|e| TransportFailure::network(e.to_string()))?;
        let body = parse_body(&raw);

        if status.is_success() {
            Ok(TransportResponse {
                status: status.as_u16(),
                status_text,
                body,
                headers,
            })
        } else {
            Err(TransportFailure {
                status: Some(status.as_u16()),
                message: format!(
                    "Http failure response for {}: {} {}",
                    request.url,
                    status.as_u16(),
                    status_text
                ),
                status_text: Some(status_text),
                error_body: (!body.is_null()).then_some(body),
                headers: Some(headers),
            })
        }
    }
}

/// Flatten a header map, joining repeated headers with ", "
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, RequestParams};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn outbound(params: RequestParams) -> OutboundRequest {
        params.prepare().unwrap().unwrap()
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert!(transport.config().timeout.is_none());
    }

    #[test]
    fn test_invalid_default_header_rejected() {
        let config = ClientConfig::new().header("bad header", "x");
        assert!(matches!(
            ReqwestTransport::with_config(config),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_success_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"a": 1}))
                    .insert_header("x-trace", "t1"),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let params = RequestParams::new(HttpMethod::Get, format!("{}/ok", server.uri()))
            .bearer_token("secret")
            .body(r#"{"ignored":true}"#);
        let res = transport.send(outbound(params)).await.unwrap();

        assert_eq!(res.status, 200);
        assert_eq!(res.status_text, "OK");
        assert_eq!(res.body, json!({"a": 1}));
        assert_eq!(res.headers.get("x-trace").map(String::as_str), Some("t1"));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "widget"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let params = RequestParams::new(HttpMethod::Post, format!("{}/items", server.uri()))
            .body(r#"{"name":"widget"}"#);
        let res = transport.send(outbound(params)).await.unwrap();

        assert_eq!(res.status, 201);
        assert_eq!(res.body, json!({"id": 7}));
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let url = format!("{}/missing", server.uri());
        let failure = transport
            .send(outbound(RequestParams::new(HttpMethod::Get, url.clone())))
            .await
            .unwrap_err();

        assert_eq!(failure.status, Some(404));
        assert_eq!(failure.status_text.as_deref(), Some("Not Found"));
        assert_eq!(failure.error_body, Some(json!({"error": "nope"})));
        assert_eq!(
            failure.message,
            format!("Http failure response for {}: 404 Not Found", url)
        );
    }

    #[tokio::test]
    async fn test_connection_refused_has_no_status() {
        let transport = ReqwestTransport::new().unwrap();
        let failure = transport
            .send(outbound(RequestParams::new(
                HttpMethod::Get,
                "http://127.0.0.1:1/unreachable",
            )))
            .await
            .unwrap_err();

        assert_eq!(failure.status, None);
        assert!(failure.error_body.is_none());
        assert!(!failure.message.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_url_is_network_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let failure = transport
            .send(outbound(RequestParams::new(HttpMethod::Get, "not a url")))
            .await
            .unwrap_err();

        assert_eq!(failure.status, None);
        assert!(failure.message.starts_with("Invalid URL not a url"));
    }

    #[test]
    fn test_collect_headers_joins_repeats() {
        let mut map = HeaderMap::new();
        map.append("vary", HeaderValue::from_static("accept"));
        map.append("vary", HeaderValue::from_static("origin"));
        let headers = collect_headers(&map);
        assert_eq!(headers.get("vary").map(String::as_str), Some("accept, origin"));
    }
}
