// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Recording transport used by unit tests

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::client::{Transport, TransportFailure, TransportResponse};
use super::request::OutboundRequest;

type Reply = std::result::Result<TransportResponse, TransportFailure>;

/// Answers per URL and remembers every request it saw
#[derive(Default)]
pub(crate) struct StubTransport {
    pub sent: Mutex<Vec<OutboundRequest>>,
    replies: Mutex<HashMap<String, Reply>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, url: &str, status: u16, body: Value) -> &Self {
        self.replies.lock().insert(
            url.to_string(),
            Ok(TransportResponse {
                status,
                status_text: "OK".to_string(),
                body,
                headers: BTreeMap::new(),
            }),
        );
        self
    }

    pub fn fail(&self, url: &str, failure: TransportFailure) -> &Self {
        self.replies.lock().insert(url.to_string(), Err(failure));
        self
    }

    /// Hold the answer for `url` back by `delay`
    pub fn delay(&self, url: &str, delay: Duration) -> &Self {
        self.delays.lock().insert(url.to_string(), delay);
        self
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent.lock().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: OutboundRequest) -> Reply {
        let delay = self.delays.lock().get(&request.url).copied();
        let reply = self
            .replies
            .lock()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Err(TransportFailure::network("no route")));
        self.sent.lock().push(request);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
