//! Pluggable HTTP transports.
//!
//! Inside a Spin component requests go through `spin_sdk::http::send`.
//! Other targets get an offline transport unless one is injected.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Sends a request and returns the raw response.
///
/// Futures are not `Send`: the Spin executor is single-threaded.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by Spin's outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpTransport for SpinTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method, Request};

        let mut builder = Request::builder();
        builder.method(Method::Get).uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }
}

/// Transport that refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

#[async_trait(?Send)]
impl HttpTransport for OfflineTransport {
    async fn send(&self, _request: RequestBuilder) -> Result<Response, FetchError> {
        Err(FetchError::NoTransport("outbound HTTP requires a Spin host"))
    }
}

/// Scripted transport: replays queued responses and records requests.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<Response, FetchError>>>,
    requests: RefCell<Vec<RequestBuilder>>,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next result.
    pub fn push(&self, result: Result<Response, FetchError>) {
        self.responses.borrow_mut().push_back(result);
    }

    /// Queue a 200 JSON response.
    pub fn push_json(&self, value: serde_json::Value) {
        self.push(Ok(Response::json_ok(&value)));
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestError("no scripted response".to_string())))
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn default_transport() -> std::rc::Rc<dyn HttpTransport> {
    std::rc::Rc::new(SpinTransport)
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn default_transport() -> std::rc::Rc<dyn HttpTransport> {
    std::rc::Rc::new(OfflineTransport)
}
