//! # Mock Transport
//!
//! A [`Transport`] for testing services and units without a server.
//!
//! Two modes:
//! - [`MockTransport::scripted`] answers requests from a queue, in order.
//! - [`MockTransport::manual`] hands every in-flight request to the test as a
//!   [`PendingRequest`], so the test decides when (and in which order)
//!   requests resolve.
//!
//! Both record every request they see.
//!
//! ```ignore
//! let transport = MockTransport::scripted([reply(200, "[]")]);
//! let service = UserService::with_transport(&ClientConfig::default(), Arc::new(transport));
//! assert!(service.list_users().await.unwrap().is_empty());
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

type Reply = Result<HttpResponse, ApiError>;

/// Shorthand for a scripted response.
pub fn reply(status: u16, body: impl Into<String>) -> Reply {
    Ok(HttpResponse::new(status, body))
}

/// Shorthand for a scripted transport failure.
pub fn unreachable() -> Reply {
    Err(ApiError::Transport("connection refused".to_string()))
}

/// A request waiting for the test to answer it.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: HttpRequest,
    responder: oneshot::Sender<Reply>,
}

impl PendingRequest {
    /// Resolve the request. Answering a request whose caller went away is a no-op.
    pub fn respond(self, reply: Reply) {
        let _ = self.responder.send(reply);
    }

    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.request.body.as_deref().and_then(|body| serde_json::from_str(body).ok())
    }
}

enum Mode {
    Scripted(Mutex<VecDeque<Reply>>),
    Manual(mpsc::UnboundedSender<PendingRequest>),
}

pub struct MockTransport {
    mode: Mode,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Answer requests from `replies` in order. Once the queue is empty every
    /// further request fails with a transport error.
    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            mode: Mode::Scripted(Mutex::new(replies.into_iter().collect())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Forward every request to the returned receiver and wait for the test
    /// to respond. A dropped `PendingRequest` fails the request.
    pub fn manual() -> (Self, mpsc::UnboundedReceiver<PendingRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let transport = Self {
            mode: Mode::Manual(sender),
            requests: Mutex::new(Vec::new()),
        };
        (transport, receiver)
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match &self.mode {
            Mode::Scripted(queue) => {
                let next = queue.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
                next.unwrap_or_else(|| Err(ApiError::Transport("no scripted response left".to_string())))
            }
            Mode::Manual(sender) => {
                let (responder, receiver) = oneshot::channel();
                sender
                    .send(PendingRequest { request, responder })
                    .map_err(|_| ApiError::Transport("mock receiver dropped".to_string()))?;
                receiver
                    .await
                    .map_err(|_| ApiError::Transport("request abandoned by mock".to_string()))?
            }
        }
    }
}
