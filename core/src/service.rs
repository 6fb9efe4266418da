//! Async data access for the user API.
//!
//! `UserService` pairs the stateless `UserClient` with a `Transport`: build
//! the request, execute it, parse the response. It performs no retries; a
//! failed call is reported once and the caller decides what to do next.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::client::UserClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CreateUser, UpdateUser, User};

#[derive(Clone)]
pub struct UserService {
    client: UserClient,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl UserService {
    /// A service talking HTTP through reqwest.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: UserClient::new(&config.base_url),
            transport,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.client.build_list_users();
        let response = self.transport.execute(request).await;
        response
            .and_then(|response| self.client.parse_list_users(response))
            .inspect_err(|error| warn!(%error, "error fetching users"))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u64) -> Result<User, ApiError> {
        let request = self.client.build_get_user(id);
        let response = self.transport.execute(request).await;
        response
            .and_then(|response| self.client.parse_get_user(response))
            .inspect_err(|error| warn!(%error, "error fetching user"))
    }

    #[instrument(skip_all)]
    pub async fn create_user(&self, input: &CreateUser) -> Result<User, ApiError> {
        let response = self.send(self.client.build_create_user(input)).await;
        response
            .and_then(|response| self.client.parse_create_user(response))
            .inspect_err(|error| warn!(%error, "error creating user"))
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: u64, input: &UpdateUser) -> Result<User, ApiError> {
        let response = self.send(self.client.build_update_user(id, input)).await;
        response
            .and_then(|response| self.client.parse_update_user(response))
            .inspect_err(|error| warn!(%error, "error updating user"))
    }

    /// Execute a built request. A request that failed to build is passed
    /// through so the caller reports it alongside transport and parse errors.
    async fn send(&self, request: Result<HttpRequest, ApiError>) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request?).await
    }
}
