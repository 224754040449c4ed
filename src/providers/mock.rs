use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;
use crate::providers::base::Provider;

/// A mock provider that returns pre-configured responses for testing, and
/// records every conversation it receives so tests can assert on prompts
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
    fail_all: bool,
    fail_at: Option<usize>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(String::from).collect(),
            )),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_all: false,
            fail_at: None,
        }
    }

    /// A provider whose every call fails with a transport-style error
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new(vec![])
        }
    }

    /// Fail only the call at `call_index` (zero-based); the failing call
    /// does not consume a queued response
    pub fn with_failure_at(mut self, call_index: usize) -> Self {
        self.fail_at = Some(call_index);
        self
    }

    /// Conversations received so far, in call order
    pub fn recorded(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn from_env() -> Result<Self> {
        Ok(Self::new(vec![]))
    }

    fn complete(&self, messages: &[Message]) -> ProviderResult<String> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.to_vec());
            calls.len() - 1
        };

        if self.fail_all || self.fail_at == Some(call_index) {
            return Err(ProviderError::Api("mock failure".to_string()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok(String::new())
        } else {
            Ok(responses.remove(0))
        }
    }

    fn describe(&self) -> String {
        "Mock provider".to_string()
    }
}
