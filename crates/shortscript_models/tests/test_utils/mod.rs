//! Test utilities for completion client tests.
//!
//! This module provides a scripted transport and small helpers.

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{MockCredentials, MockTransport, RecordedCall};

use serde_json::{Value, json};

/// A provider reply whose first choice carries `content`.
#[allow(dead_code)]
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200}
    })
}
