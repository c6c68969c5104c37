//! Scripted transport for deterministic client tests.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use shortscript_error::{GenerationError, GenerationResult};
use shortscript_interface::CredentialSource;
use shortscript_models::CompletionTransport;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Endpoint the client posted to
    pub endpoint: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body
    pub body: Value,
    /// Tokio clock reading when the call arrived
    pub at: Instant,
}

#[derive(Default)]
struct Inner {
    replies: Mutex<VecDeque<GenerationResult<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// Transport that replays scripted replies in order and records every call.
///
/// Clones share state, so a test can keep one handle and give the other to
/// the client.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

#[allow(dead_code)]
impl MockTransport {
    /// Mock that returns `replies` in order, then transport errors.
    pub fn new(replies: Vec<GenerationResult<Value>>) -> Self {
        let mock = Self::default();
        mock.inner.replies.lock().unwrap().extend(replies);
        mock
    }

    /// Mock that fails `failures` times with HTTP 503, then returns `reply`.
    pub fn failing_then(failures: usize, reply: Value) -> Self {
        let mut replies: Vec<GenerationResult<Value>> = (0..failures)
            .map(|_| Err(GenerationError::transport(Some(503), "Service Unavailable")))
            .collect();
        replies.push(Ok(reply));
        Self::new(replies)
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> GenerationResult<Value> {
        self.inner.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.to_string(),
            headers,
            body: body.clone(),
            at: Instant::now(),
        });

        self.inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::transport(None, "no scripted reply")))
    }
}

/// In-memory credential source.
#[derive(Default)]
pub struct MockCredentials {
    values: HashMap<String, String>,
}

#[allow(dead_code)]
impl MockCredentials {
    /// Source holding a single key.
    pub fn with(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl CredentialSource for MockCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
