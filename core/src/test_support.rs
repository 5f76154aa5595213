//! In-memory transport that records requests and replays canned outcomes.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

enum Outcome {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct MockTransport {
    outcomes: RefCell<VecDeque<Outcome>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response with `status` and `body`.
    pub(crate) fn with_json(self, status: u16, body: &str) -> Self {
        self.outcomes.borrow_mut().push_back(Outcome::Respond(HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    /// Queue a transport failure.
    pub(crate) fn with_failure(self, message: &str) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Outcome::Fail(message.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    /// Body of the last request, parsed as JSON.
    pub(crate) fn last_body(&self) -> Option<serde_json::Value> {
        let request = self.last_request()?;
        serde_json::from_slice(request.body.as_deref()?).ok()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        match self.outcomes.borrow_mut().pop_front() {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(message)) => Err(ApiError::network(&request.url, message)),
            None => panic!("unexpected request to {}", request.url),
        }
    }
}
