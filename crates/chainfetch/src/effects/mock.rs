use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::data::{RequestDescriptor, RequestOptions, Response};
use crate::effects::Transport;
use crate::error::BoxError;

/// Error returned by [`MockTransport`] for configured failures and unknown urls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
enum MockReply {
    Respond(Response),
    Fail(String),
}

/// In-memory transport for tests.
///
/// Replies are looked up by exact url; every call is recorded, including
/// ones that fail.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    fallback: Option<Response>,
    calls: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `url` with `response`.
    pub fn with_response(mut self, url: impl Into<String>, response: Response) -> Self {
        self.replies.insert(url.into(), MockReply::Respond(response));
        self
    }

    /// Fail requests for `url` with a [`MockError`] carrying `message`.
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.replies.insert(url.into(), MockReply::Fail(message.into()));
        self
    }

    /// Answer requests for any unknown url with `response`.
    pub fn with_fallback(mut self, response: Response) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    pub fn last_call(&self) -> Option<RequestDescriptor> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RequestDescriptor>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply(&self, url: &str) -> Result<Response, MockError> {
        match self.replies.get(url) {
            Some(MockReply::Respond(response)) => Ok(response.clone()),
            Some(MockReply::Fail(message)) => Err(MockError(message.clone())),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| MockError(format!("no mock response for URL: {url}"))),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, BoxError> {
        self.lock()
            .push(RequestDescriptor::new(url, options.clone()));
        self.reply(url).map_err(Into::into)
    }
}
